/// Cone: 60 lateral slices hinged at the apex, unfolding into a circular
/// sector of radius equal to the slant height
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

use crate::error::Result;
use crate::geometry::{NetPiece, Panel, ShapeGeometry};
use crate::hinge::{Hinge, Pose};
use crate::measure::{Measurements, CM_PER_UNIT};
use crate::shapes::{validate_positive, Shape, ShapeKind};
use crate::view::Label;

use std::f32::consts::{FRAC_PI_2, TAU};

/// Angular tessellation of the lateral surface.
pub const CONE_SEGMENTS: usize = 60;

/// Slices tilt down by slightly less than a quarter turn when flat, so the
/// sector reads as lying on the ground without z-fighting the grid.
const UNFOLD_TILT: f32 = FRAC_PI_2 * 0.95;

const RATE: f32 = 0.4;
const MAX_RADIUS: f32 = 2.5;
const MIN_RADIUS: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub radius: f32,
    pub height: f32,
}

impl Default for Cone {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 2.0,
        }
    }
}

impl Cone {
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    pub fn slant_height(&self) -> f32 {
        self.radius.hypot(self.height)
    }

    /// Angle spanned by the flattened lateral surface. Preserves arc
    /// length: `slant * unfold_angle = 2πr`.
    pub fn unfold_angle(&self) -> f32 {
        TAU * self.radius / self.slant_height()
    }

    fn apex(&self) -> Point3<f32> {
        Point3::new(0.0, self.height / 2.0, 0.0)
    }

    fn base_point(&self, theta: f32) -> Point3<f32> {
        Point3::new(
            theta.cos() * self.radius,
            -self.height / 2.0,
            theta.sin() * self.radius,
        )
    }

    /// Unfolded rotation of slice `i` at local progress `t`, composed as
    /// a yaw fanning the slice across the sector and a pitch laying it flat.
    fn slice_rotation(&self, i: usize, t: f32) -> UnitQuaternion<f32> {
        let unfold_angle = self.unfold_angle();
        let rot_y = (unfold_angle / 2.0 - i as f32 / CONE_SEGMENTS as f32 * unfold_angle) * t;
        let rot_x = -UNFOLD_TILT * t;
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), rot_x)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), rot_y)
    }

    fn sector(&self) -> NetPiece {
        let slant = self.slant_height();
        let step = self.unfold_angle() / CONE_SEGMENTS as f32;
        let mut vertices = vec![Point3::origin()];
        for k in 0..=CONE_SEGMENTS {
            let theta = k as f32 * step;
            vertices.push(Point3::new(theta.cos() * slant, 0.0, theta.sin() * slant));
        }
        let indices = (0..CONE_SEGMENTS)
            .map(|k| [0, (k + 1) as u16, (k + 2) as u16])
            .collect();
        NetPiece::new(vertices, indices)
    }
}

impl Shape for Cone {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cone
    }

    fn build(&self) -> Result<ShapeGeometry> {
        validate_positive(&[("radius", self.radius), ("height", self.height)])?;

        let apex = self.apex();
        let step = TAU / CONE_SEGMENTS as f32;

        let panels = (0..CONE_SEGMENTS)
            .map(|i| {
                let theta1 = i as f32 * step;
                let theta2 = (i + 1) as f32 * step;
                let local = vec![
                    Point3::origin(), // apex, which is also the pivot
                    self.base_point(theta1) - apex.coords,
                    self.base_point(theta2) - apex.coords,
                ];
                let unfolded = Pose::new(self.slice_rotation(i, 1.0), Vector3::zeros());
                Panel::new(local, vec![[0, 1, 2]], apex, unfolded, Some(i))
            })
            .collect();

        Ok(ShapeGeometry::new(panels, vec![self.sector()]))
    }

    fn hinges(&self) -> Vec<Hinge> {
        let apex = self.apex();
        let step = TAU / CONE_SEGMENTS as f32;
        (0..CONE_SEGMENTS)
            .map(|i| {
                let base = self.base_point(i as f32 * step);
                Hinge::new(Unit::new_normalize(base - apex), apex)
            })
            .collect()
    }

    fn apply_progress(&self, geometry: &mut ShapeGeometry, eased: f32) {
        for panel in &mut geometry.panels {
            let i = panel.phase.unwrap_or(0);
            let local = panel.local_progress(eased);
            panel.current = Pose::new(self.slice_rotation(i, local), Vector3::zeros());
        }
        geometry.crossfade(eased);
    }

    fn labels(&self, _unfolded: bool) -> Vec<Label> {
        vec![
            Label::new(
                "Apex (1 vertex)",
                Point3::new(0.0, self.height / 2.0, 0.0),
                (10.0, -10.0),
            ),
            Label::new(
                "Slant height (s)",
                Point3::new(self.radius / 2.0, 0.0, 0.0),
                (10.0, 0.0),
            ),
            Label::new(
                "Base (circular)",
                Point3::new(0.0, -self.height / 2.0, 0.0),
                (10.0, 10.0),
            ),
        ]
    }

    fn measurements(&self) -> Measurements {
        let r = self.radius as f64 * CM_PER_UNIT;
        let h = self.height as f64 * CM_PER_UNIT;
        let s = r.hypot(h);
        let v = std::f64::consts::PI * r * r * h / 3.0;
        let a = std::f64::consts::PI * r * (r + s);
        Measurements::new(
            format!("r = {:.0} cm, h = {:.0} cm", r, h),
            vec![
                format!("s = {:.2} cm", s),
                format!("V = {:.2} cm³", v),
                format!("A = {:.2} cm²", a),
            ],
        )
    }

    fn increase_size(&mut self) -> bool {
        if self.radius > MAX_RADIUS {
            return false;
        }
        self.radius += 0.1;
        self.height += 0.2;
        true
    }

    fn decrease_size(&mut self) -> bool {
        if self.radius <= MIN_RADIUS {
            return false;
        }
        self.radius -= 0.1;
        self.height -= 0.2;
        true
    }

    fn rate(&self) -> f32 {
        RATE
    }

    fn home_camera(&self) -> Point3<f32> {
        Point3::new(3.0, 2.5, 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::AnimationState;
    use approx::assert_relative_eq;

    #[test]
    fn test_build_rejects_nonpositive_params() {
        assert!(Cone::new(0.0, 2.0).build().is_err());
        assert!(Cone::new(1.0, -1.0).build().is_err());
    }

    #[test]
    fn test_folded_panels_reconstruct_the_solid() {
        let cone = Cone::default();
        let geo = cone.build().unwrap();
        assert_eq!(geo.panels.len(), CONE_SEGMENTS);
        for panel in &geo.panels {
            // Apex vertex sits exactly at the cone tip.
            assert_eq!(panel.world_vertex(0), Point3::new(0.0, 1.0, 0.0));
            // Base vertices lie exactly on the circle of the given radius.
            for i in 1..3 {
                let v = panel.world_vertex(i);
                assert_relative_eq!(v.x * v.x + v.z * v.z, 1.0, epsilon = 1e-5);
                assert_eq!(v.y, -1.0);
            }
        }
    }

    #[test]
    fn test_slant_and_unfold_angle() {
        let cone = Cone::new(1.0, 2.0);
        assert_relative_eq!(cone.slant_height(), 5.0f32.sqrt(), epsilon = 1e-6);
        assert_relative_eq!(
            cone.slant_height() * cone.unfold_angle(),
            TAU,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_sector_rim_has_slant_radius() {
        let cone = Cone::default();
        let geo = cone.build().unwrap();
        let sector = &geo.net[0];
        assert_eq!(sector.vertices.len(), CONE_SEGMENTS + 2);
        for v in &sector.vertices[1..] {
            assert_relative_eq!(v.coords.norm(), cone.slant_height(), epsilon = 1e-5);
        }
        // The fan spans exactly the unfold angle.
        let last = sector.vertices.last().unwrap();
        assert_relative_eq!(last.z.atan2(last.x), cone.unfold_angle(), epsilon = 1e-4);
    }

    #[test]
    fn test_hinges_run_from_apex_to_base() {
        let cone = Cone::default();
        for hinge in cone.hinges() {
            assert_eq!(hinge.pivot, Point3::new(0.0, 1.0, 0.0));
            assert_relative_eq!(hinge.axis.norm(), 1.0, epsilon = 1e-6);
            assert!(hinge.axis.y < 0.0);
        }
    }

    #[test]
    fn test_stagger_leaves_late_slices_short_of_target() {
        let cone = Cone::default();
        let mut geo = cone.build().unwrap();
        cone.apply_progress(&mut geo, 1.0);
        // The peeling wave finishes early slices but not the last ones;
        // the terminal snap is what lands everything exactly.
        assert_eq!(geo.panels[0].current.rotation, geo.panels[0].unfolded.rotation);
        let last = &geo.panels[CONE_SEGMENTS - 1];
        assert_ne!(last.current.rotation, last.unfolded.rotation);
        geo.snap_unfolded();
        let last = &geo.panels[CONE_SEGMENTS - 1];
        assert_eq!(last.current.rotation, last.unfolded.rotation);
    }

    #[test]
    fn test_crossfade_tracks_progress() {
        let cone = Cone::default();
        let mut geo = cone.build().unwrap();
        cone.apply_progress(&mut geo, 0.25);
        assert_relative_eq!(geo.panels[0].opacity, 0.75, epsilon = 1e-6);
        assert_relative_eq!(geo.net[0].opacity, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_measurement_scenario() {
        // r = 10 cm, h = 20 cm.
        let m = Cone::new(1.0, 2.0).measurements();
        assert_eq!(m.params, "r = 10 cm, h = 20 cm");
        assert_eq!(m.lines[0], "s = 22.36 cm");
        assert_eq!(m.lines[1], "V = 2094.40 cm³");
    }

    #[test]
    fn test_resize_clamps_silently() {
        let mut cone = Cone::new(2.6, 5.2);
        assert!(!cone.increase_size());
        assert_eq!(cone.radius, 2.6);
        let mut cone = Cone::new(0.3, 0.6);
        assert!(!cone.decrease_size());
        assert_eq!(cone.radius, 0.3);
        let mut cone = Cone::default();
        assert!(cone.increase_size());
        assert_relative_eq!(cone.radius, 1.1, epsilon = 1e-6);
        assert_relative_eq!(cone.height, 2.2, epsilon = 1e-6);
    }

    #[test]
    fn test_resize_mid_animation_matches_undisturbed_run() {
        let mut cone = Cone::default();
        let mut driver = AnimationState::new(cone.rate());
        driver.unfold();
        driver.advance(0.7);

        cone.increase_size();
        let mut rebuilt = cone.build().unwrap();
        cone.apply_progress(&mut rebuilt, driver.eased());

        // An undisturbed animation of the resized cone up to the same
        // progress produces identical poses and opacities.
        let fresh = Cone::new(cone.radius, cone.height);
        let mut undisturbed = fresh.build().unwrap();
        fresh.apply_progress(&mut undisturbed, driver.eased());

        for (a, b) in rebuilt.panels.iter().zip(&undisturbed.panels) {
            assert_eq!(a.current, b.current);
            assert_eq!(a.opacity, b.opacity);
        }
        assert_eq!(rebuilt.net[0].opacity, undisturbed.net[0].opacity);
    }
}
