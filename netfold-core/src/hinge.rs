/// Hinge axes and the rigid poses panels interpolate through
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

/// A rigid transform: rotation about a panel's pivot plus a translation.
///
/// The folded pose of every panel is the identity by construction; the
/// unfolded pose is fixed at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub rotation: UnitQuaternion<f32>,
    pub translation: Vector3<f32>,
}

impl Pose {
    pub fn identity() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
        }
    }

    pub fn new(rotation: UnitQuaternion<f32>, translation: Vector3<f32>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Interpolate from the identity (folded) pose toward this pose.
    ///
    /// For the single-axis rotations used by the cylinder, pyramid and cube
    /// this matches scaling the rotation angle by `t` exactly.
    pub fn interpolated(&self, t: f32) -> Pose {
        Pose {
            rotation: UnitQuaternion::identity().slerp(&self.rotation, t),
            translation: self.translation * t,
        }
    }

    /// Apply the pose to a point expressed relative to the panel pivot.
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        self.rotation * point + self.translation
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// The axis and pivot a panel rotates about when unfolding.
///
/// The axis is derived solely from the two endpoints of the shared edge at
/// construction time and is immutable for the lifetime of the panel set.
#[derive(Debug, Clone)]
pub struct Hinge {
    pub axis: Unit<Vector3<f32>>,
    pub pivot: Point3<f32>,
}

impl Hinge {
    pub fn new(axis: Unit<Vector3<f32>>, pivot: Point3<f32>) -> Self {
        Self { axis, pivot }
    }

    /// Hinge along a shared edge, pivoting at the edge midpoint.
    pub fn along_edge(a: Point3<f32>, b: Point3<f32>) -> Self {
        Self {
            axis: Unit::new_normalize(b - a),
            pivot: nalgebra::center(&a, &b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_pose_is_noop() {
        let p = Point3::new(1.0, -2.0, 3.0);
        assert_eq!(Pose::identity().transform_point(&p), p);
    }

    #[test]
    fn test_interpolated_endpoints() {
        let full = Pose::new(
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f32::consts::PI / 2.0),
            Vector3::new(2.0, 0.0, 0.0),
        );
        let start = full.interpolated(0.0);
        assert_eq!(start.rotation, UnitQuaternion::identity());
        assert_eq!(start.translation, Vector3::zeros());
        let end = full.interpolated(1.0);
        assert_relative_eq!(end.rotation.angle(), full.rotation.angle(), epsilon = 1e-6);
        assert_eq!(end.translation, full.translation);
    }

    #[test]
    fn test_interpolated_scales_single_axis_angle() {
        let full = Pose::new(
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1.2),
            Vector3::zeros(),
        );
        let half = full.interpolated(0.5);
        assert_relative_eq!(half.rotation.angle(), 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_hinge_from_edge_endpoints() {
        let a = Point3::new(1.0, 0.0, 1.0);
        let b = Point3::new(1.0, 0.0, -1.0);
        let hinge = Hinge::along_edge(a, b);
        assert_relative_eq!(hinge.axis.norm(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(hinge.axis.z, -1.0, epsilon = 1e-6);
        assert_eq!(hinge.pivot, Point3::new(1.0, 0.0, 0.0));
    }
}
