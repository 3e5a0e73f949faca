/// Cube: five faces hinged at the shared centre pivot, unfolding into a
/// cross in the plane of the static back face
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

use crate::error::Result;
use crate::geometry::{Panel, ShapeGeometry};
use crate::hinge::{Hinge, Pose};
use crate::measure::{Measurements, CM_PER_UNIT};
use crate::shapes::{validate_positive, Shape, ShapeKind};
use crate::view::Label;

use std::f32::consts::{FRAC_PI_2, PI};

const RATE: f32 = 0.6;
const MAX_EDGE: f32 = 2.5;
const MIN_EDGE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    pub edge: f32,
}

impl Default for Cube {
    fn default() -> Self {
        Self { edge: 1.0 }
    }
}

/// Axis a face's square lies perpendicular to, with the sign of its offset.
enum FacePlane {
    X(f32),
    Y(f32),
    Z(f32),
}

impl Cube {
    pub fn new(edge: f32) -> Self {
        Self { edge }
    }

    fn quad(&self, plane: FacePlane) -> Vec<Point3<f32>> {
        let h = self.edge / 2.0;
        match plane {
            FacePlane::Z(z) => vec![
                Point3::new(-h, -h, z),
                Point3::new(h, -h, z),
                Point3::new(h, h, z),
                Point3::new(-h, h, z),
            ],
            FacePlane::X(x) => vec![
                Point3::new(x, -h, -h),
                Point3::new(x, -h, h),
                Point3::new(x, h, h),
                Point3::new(x, h, -h),
            ],
            FacePlane::Y(y) => vec![
                Point3::new(-h, y, -h),
                Point3::new(h, y, -h),
                Point3::new(h, y, h),
                Point3::new(-h, y, h),
            ],
        }
    }

    /// Hinged face: all five share the cube-centre pivot, each with a
    /// single-axis rotation plus a translation carrying it into the plane
    /// of the back face.
    fn face(&self, plane: FacePlane, angle: (Unit<Vector3<f32>>, f32), shift: Vector3<f32>) -> Panel {
        let local = self.quad(plane);
        let unfolded = Pose::new(UnitQuaternion::from_axis_angle(&angle.0, angle.1), shift);
        Panel::new(
            local,
            vec![[0, 1, 2], [0, 2, 3]],
            Point3::origin(),
            unfolded,
            None,
        )
    }
}

impl Shape for Cube {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cube
    }

    fn build(&self) -> Result<ShapeGeometry> {
        validate_positive(&[("edge", self.edge)])?;

        let a = self.edge;
        let h = a / 2.0;
        let y = Vector3::y_axis();
        let x = Vector3::x_axis();

        let panels = vec![
            // Back face stays put; the cross assembles in its plane.
            Panel::fixed(self.quad(FacePlane::Z(-h)), vec![[0, 1, 2], [0, 2, 3]]),
            self.face(FacePlane::Z(h), (y, PI), Vector3::new(2.0 * a, 0.0, 0.0)),
            self.face(FacePlane::X(-h), (y, -FRAC_PI_2), Vector3::new(-a, 0.0, 0.0)),
            self.face(FacePlane::X(h), (y, FRAC_PI_2), Vector3::new(a, 0.0, 0.0)),
            self.face(FacePlane::Y(h), (x, -FRAC_PI_2), Vector3::new(0.0, a, 0.0)),
            self.face(FacePlane::Y(-h), (x, FRAC_PI_2), Vector3::new(0.0, -a, 0.0)),
        ];

        Ok(ShapeGeometry::new(panels, vec![]))
    }

    fn hinges(&self) -> Vec<Hinge> {
        vec![
            Hinge::new(Vector3::y_axis(), Point3::origin()), // front
            Hinge::new(Vector3::y_axis(), Point3::origin()), // left
            Hinge::new(Vector3::y_axis(), Point3::origin()), // right
            Hinge::new(Vector3::x_axis(), Point3::origin()), // top
            Hinge::new(Vector3::x_axis(), Point3::origin()), // bottom
        ]
    }

    fn apply_progress(&self, geometry: &mut ShapeGeometry, eased: f32) {
        for panel in &mut geometry.panels {
            panel.current = panel.unfolded.interpolated(panel.local_progress(eased));
        }
    }

    fn labels(&self, _unfolded: bool) -> Vec<Label> {
        let h = self.edge / 2.0;
        vec![
            Label::new("Vertex (8 total)", Point3::new(h, h, h), (10.0, -10.0)),
            Label::new("Edge (12 total)", Point3::new(h, h, 0.0), (10.0, 0.0)),
            Label::new("Face (6 total)", Point3::new(0.0, 0.0, h + 0.01), (10.0, 10.0)),
        ]
    }

    fn measurements(&self) -> Measurements {
        let a = self.edge as f64 * CM_PER_UNIT;
        let v = a.powi(3);
        let area = 6.0 * a * a;
        Measurements::new(
            format!("a = {:.0} cm", a),
            vec![format!("V = {:.0} cm³", v), format!("A = {:.0} cm²", area)],
        )
    }

    fn increase_size(&mut self) -> bool {
        if self.edge > MAX_EDGE {
            return false;
        }
        self.edge += 0.1;
        true
    }

    fn decrease_size(&mut self) -> bool {
        if self.edge <= MIN_EDGE {
            return false;
        }
        self.edge -= 0.1;
        true
    }

    fn rate(&self) -> f32 {
        RATE
    }

    fn home_camera(&self) -> Point3<f32> {
        Point3::new(4.0, 4.0, 6.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_build_rejects_nonpositive_edge() {
        assert!(Cube::new(0.0).build().is_err());
        assert!(Cube::new(-1.0).build().is_err());
    }

    #[test]
    fn test_folded_faces_bound_the_cube() {
        let cube = Cube::default();
        let geo = cube.build().unwrap();
        assert_eq!(geo.panels.len(), 6);
        for panel in &geo.panels {
            for i in 0..4 {
                let v = panel.world_vertex(i);
                let max = v.x.abs().max(v.y.abs()).max(v.z.abs());
                assert_eq!(max, 0.5);
            }
        }
    }

    #[test]
    fn test_unfolded_cross_lies_in_the_back_plane() {
        let cube = Cube::default();
        let mut geo = cube.build().unwrap();
        geo.snap_unfolded();
        for panel in &geo.panels {
            for i in 0..4 {
                assert_relative_eq!(panel.world_vertex(i).z, -0.5, epsilon = 1e-5);
            }
        }
        // Face centres form the cross: front flips out past the right face.
        let center = |p: &crate::geometry::Panel| {
            let mut c = Vector3::zeros();
            for i in 0..4 {
                c += p.world_vertex(i).coords;
            }
            Point3::origin() + c / 4.0
        };
        assert_relative_eq!(center(&geo.panels[1]).x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(center(&geo.panels[2]).x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(center(&geo.panels[3]).x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(center(&geo.panels[4]).y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(center(&geo.panels[5]).y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_round_trip_restores_the_folded_cube() {
        let cube = Cube::default();
        let mut geo = cube.build().unwrap();
        cube.apply_progress(&mut geo, 0.83);
        geo.snap_folded();
        for panel in &geo.panels {
            assert_eq!(panel.current, Pose::identity());
            assert_eq!(panel.opacity, 1.0);
        }
    }

    #[test]
    fn test_hinge_axes_match_face_rotations() {
        let cube = Cube::default();
        let hinges = cube.hinges();
        assert_eq!(hinges.len(), 5);
        for hinge in &hinges {
            assert_eq!(hinge.pivot, Point3::origin());
        }
        assert_eq!(hinges[0].axis.y, 1.0);
        assert_eq!(hinges[4].axis.x, 1.0);
    }

    #[test]
    fn test_measurement_scenario() {
        // a = 10 cm.
        let m = Cube::default().measurements();
        assert_eq!(m.params, "a = 10 cm");
        assert_eq!(m.lines[0], "V = 1000 cm³");
        assert_eq!(m.lines[1], "A = 600 cm²");

        let mut cube = Cube::default();
        assert!(cube.increase_size());
        let m = cube.measurements();
        assert_eq!(m.params, "a = 11 cm");
        assert_eq!(m.lines[0], "V = 1331 cm³");
    }

    #[test]
    fn test_resize_clamps_silently() {
        let mut cube = Cube::new(2.6);
        assert!(!cube.increase_size());
        assert_eq!(cube.edge, 2.6);
        let mut cube = Cube::new(0.3);
        assert!(!cube.decrease_size());
        assert_eq!(cube.edge, 0.3);
    }
}
