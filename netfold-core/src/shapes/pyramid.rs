/// Square pyramid: four lateral faces hinged at the base edges, petaling
/// outward around the static base
use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::error::Result;
use crate::geometry::{Panel, ShapeGeometry};
use crate::hinge::{Hinge, Pose};
use crate::measure::Measurements;
use crate::shapes::{validate_positive, Shape, ShapeKind};
use crate::view::Label;

/// Hand-tuned opening angle of the lateral faces, a touch past a right
/// angle so the apexes clear the base plane visually.
const UNFOLD_ANGLE: f32 = std::f32::consts::PI / 1.73;

const RATE: f32 = 0.9;
const MAX_HALF_SIDE: f32 = 2.0;
const MIN_HALF_SIDE: f32 = 0.51;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pyramid {
    pub half_side: f32,
    pub height: f32,
}

impl Default for Pyramid {
    fn default() -> Self {
        Self {
            half_side: 1.0,
            height: 3.0,
        }
    }
}

impl Pyramid {
    pub fn new(half_side: f32, height: f32) -> Self {
        Self { half_side, height }
    }

    /// Base corners in winding order, counter-clockwise seen from above.
    fn corners(&self) -> [Point3<f32>; 4] {
        let s = self.half_side;
        [
            Point3::new(s, 0.0, s),
            Point3::new(s, 0.0, -s),
            Point3::new(-s, 0.0, -s),
            Point3::new(-s, 0.0, s),
        ]
    }

    fn apex(&self) -> Point3<f32> {
        Point3::new(0.0, self.height, 0.0)
    }

    /// Lateral face over the base edge `a → b`, pivoting at the edge
    /// midpoint. The edge direction is the hinge axis, so a positive
    /// rotation swings the apex down and outward.
    fn face(&self, a: Point3<f32>, b: Point3<f32>) -> Panel {
        let hinge = Hinge::along_edge(a, b);
        let local = vec![
            a - hinge.pivot.coords,
            b - hinge.pivot.coords,
            self.apex() - hinge.pivot.coords,
        ];
        let unfolded = Pose::new(
            UnitQuaternion::from_axis_angle(&hinge.axis, UNFOLD_ANGLE),
            Vector3::zeros(),
        );
        Panel::new(local, vec![[0, 1, 2]], hinge.pivot, unfolded, None)
    }
}

impl Shape for Pyramid {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Pyramid
    }

    fn build(&self) -> Result<ShapeGeometry> {
        validate_positive(&[("half_side", self.half_side), ("height", self.height)])?;

        let [v0, v1, v2, v3] = self.corners();
        let base = Panel::fixed(vec![v0, v1, v2, v3], vec![[0, 1, 2], [2, 3, 0]]);
        let panels = vec![
            base,
            self.face(v0, v1),
            self.face(v1, v2),
            self.face(v2, v3),
            self.face(v3, v0),
        ];

        // The opened faces are the net; no auxiliary pieces.
        Ok(ShapeGeometry::new(panels, vec![]))
    }

    fn hinges(&self) -> Vec<Hinge> {
        let [v0, v1, v2, v3] = self.corners();
        vec![
            Hinge::along_edge(v0, v1),
            Hinge::along_edge(v1, v2),
            Hinge::along_edge(v2, v3),
            Hinge::along_edge(v3, v0),
        ]
    }

    fn apply_progress(&self, geometry: &mut ShapeGeometry, eased: f32) {
        for panel in &mut geometry.panels {
            panel.current = panel.unfolded.interpolated(panel.local_progress(eased));
        }
    }

    fn labels(&self, _unfolded: bool) -> Vec<Label> {
        vec![
            Label::new(
                "Vertices (5 total)",
                Point3::new(0.0, self.height, 0.0),
                (10.0, -10.0),
            ),
            Label::new(
                "Edges (8 total)",
                Point3::new(0.0, 0.0, self.half_side),
                (10.0, 0.0),
            ),
            Label::new(
                "Faces (5 total)",
                Point3::new(self.half_side * 0.7, self.height / 2.0, 0.0),
                (10.0, 10.0),
            ),
        ]
    }

    fn measurements(&self) -> Measurements {
        // Full base side and apex height in centimetres.
        let a = self.half_side as f64 * 2.0 * 5.0;
        let t = self.height as f64 * 5.0;
        let v = a * a * t / 3.0;
        let area = a * a + 4.0 * (a * t / 2.0);
        Measurements::new(
            format!("a = {:.0} cm, t = {:.0} cm", a, t),
            vec![format!("V = {:.0} cm³", v), format!("A = {:.0} cm²", area)],
        )
    }

    fn increase_size(&mut self) -> bool {
        if self.half_side >= MAX_HALF_SIDE {
            return false;
        }
        self.half_side += 0.1;
        self.height += 0.2;
        true
    }

    fn decrease_size(&mut self) -> bool {
        if self.half_side <= MIN_HALF_SIDE {
            return false;
        }
        self.half_side -= 0.1;
        self.height -= 0.2;
        true
    }

    fn rate(&self) -> f32 {
        RATE
    }

    fn home_camera(&self) -> Point3<f32> {
        Point3::new(6.5, 5.5, 6.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_build_rejects_nonpositive_params() {
        assert!(Pyramid::new(0.0, 3.0).build().is_err());
        assert!(Pyramid::new(1.0, -3.0).build().is_err());
    }

    #[test]
    fn test_folded_faces_meet_at_the_apex() {
        let pyramid = Pyramid::default();
        let geo = pyramid.build().unwrap();
        assert_eq!(geo.panels.len(), 5);
        assert!(geo.net.is_empty());
        for face in &geo.panels[1..] {
            assert_eq!(face.world_vertex(2), Point3::new(0.0, 3.0, 0.0));
            // Base edge vertices sit on the square of the given half-side.
            for i in 0..2 {
                let v = face.world_vertex(i);
                assert_eq!(v.y, 0.0);
                assert_relative_eq!(v.x.abs().max(v.z.abs()), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_base_never_moves() {
        let pyramid = Pyramid::default();
        let mut geo = pyramid.build().unwrap();
        pyramid.apply_progress(&mut geo, 0.6);
        let base = &geo.panels[0];
        assert_eq!(base.current, Pose::identity());
        assert_eq!(base.world_vertex(0), Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_unfolded_apexes_swing_down_and_outward() {
        let pyramid = Pyramid::default();
        let slant = (pyramid.height * pyramid.height
            + pyramid.half_side * pyramid.half_side)
            .sqrt();
        let mut geo = pyramid.build().unwrap();
        geo.snap_unfolded();
        let mut apex_heights = Vec::new();
        for face in &geo.panels[1..] {
            let apex = face.world_vertex(2);
            // Rigid motion preserves the apex-to-hinge distance.
            assert_relative_eq!((apex - face.pivot).norm(), slant, epsilon = 1e-5);
            // Past a quarter turn the apex drops toward the base plane
            // and lands outside the base square.
            assert!(apex.y < pyramid.height / 2.0);
            assert!(apex.x.abs().max(apex.z.abs()) > pyramid.half_side);
            apex_heights.push(apex.y);
        }
        // Four-fold symmetry.
        for y in &apex_heights[1..] {
            assert_relative_eq!(*y, apex_heights[0], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_faces_track_progress_without_crossfade() {
        let pyramid = Pyramid::default();
        let mut geo = pyramid.build().unwrap();
        pyramid.apply_progress(&mut geo, 0.5);
        for panel in &geo.panels {
            assert_eq!(panel.opacity, 1.0);
        }
        // Halfway rotation about the hinge axis.
        let face = &geo.panels[1];
        assert_relative_eq!(face.current.rotation.angle(), UNFOLD_ANGLE / 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_hinges_lie_in_the_base_plane() {
        let pyramid = Pyramid::default();
        let hinges = pyramid.hinges();
        assert_eq!(hinges.len(), 4);
        for hinge in &hinges {
            assert_eq!(hinge.pivot.y, 0.0);
            assert_relative_eq!(hinge.axis.y, 0.0, epsilon = 1e-6);
            assert_relative_eq!(hinge.axis.norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_measurement_formulas() {
        // a = 10 cm, t = 15 cm.
        let m = Pyramid::default().measurements();
        assert_eq!(m.params, "a = 10 cm, t = 15 cm");
        assert_eq!(m.lines[0], "V = 500 cm³");
        assert_eq!(m.lines[1], "A = 400 cm²");
    }

    #[test]
    fn test_resize_clamps_silently() {
        let mut pyramid = Pyramid::new(2.0, 5.0);
        assert!(!pyramid.increase_size());
        let mut pyramid = Pyramid::new(0.5, 1.0);
        assert!(!pyramid.decrease_size());
        let mut pyramid = Pyramid::default();
        assert!(pyramid.increase_size());
        assert_relative_eq!(pyramid.half_side, 1.1, epsilon = 1e-6);
        assert_relative_eq!(pyramid.height, 3.2, epsilon = 1e-6);
    }
}
