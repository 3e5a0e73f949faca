/// Cylinder: 40 lateral panels rolling out into a rectangle, with the two
/// caps tipping over the rim onto the plane of the net
use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::error::Result;
use crate::geometry::{NetPiece, Panel, ShapeGeometry};
use crate::hinge::{Hinge, Pose};
use crate::measure::{Measurements, CM_PER_UNIT};
use crate::shapes::{validate_positive, Shape, ShapeKind};
use crate::view::Label;

use std::f32::consts::{FRAC_PI_2, TAU};

/// Angular tessellation of the lateral surface.
pub const CYLINDER_SEGMENTS: usize = 40;

/// The net pieces sit just off the unfold plane to avoid z-fighting the
/// flattened panels.
const NET_LIFT: f32 = 0.01;

const RATE: f32 = 0.8;
const MAX_RADIUS: f32 = 2.5;
const MIN_RADIUS: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub radius: f32,
    pub height: f32,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 2.0,
        }
    }
}

impl Cylinder {
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    pub fn circumference(&self) -> f32 {
        TAU * self.radius
    }

    fn rim_point(&self, theta: f32, y: f32) -> Point3<f32> {
        Point3::new(theta.cos() * self.radius, y, theta.sin() * self.radius)
    }

    /// Where panel `i`'s pivot lands once the lateral surface is rolled out
    /// flat. Spacing uses arc length, so the flattened panels reassemble
    /// edge-to-edge without cumulative drift.
    fn unrolled_x(&self, i: usize) -> f32 {
        let width = self.circumference() / CYLINDER_SEGMENTS as f32;
        i as f32 * width - self.circumference() / 2.0 + width / 2.0
    }

    fn lateral_panel(&self, i: usize) -> Panel {
        let step = TAU / CYLINDER_SEGMENTS as f32;
        let theta1 = i as f32 * step;
        let theta2 = (i + 1) as f32 * step;
        let center = theta1 + step / 2.0;
        let half_h = self.height / 2.0;

        let pivot = self.rim_point(center, 0.0);
        let local = vec![
            self.rim_point(theta1, -half_h) - pivot.coords,
            self.rim_point(theta2, -half_h) - pivot.coords,
            self.rim_point(theta2, half_h) - pivot.coords,
            self.rim_point(theta1, half_h) - pivot.coords,
        ];

        // Rotate the outward normal onto +Z, then carry the pivot onto the
        // unroll line.
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), center - FRAC_PI_2);
        let translation = Vector3::new(self.unrolled_x(i), 0.0, 0.0) - pivot.coords;
        let unfolded = Pose::new(rotation, translation);

        Panel::new(local, vec![[0, 1, 2], [0, 2, 3]], pivot, unfolded, Some(i))
    }

    fn disc(center: Point3<f32>, radius: f32, in_xz: bool) -> (Vec<Point3<f32>>, Vec<[u16; 3]>) {
        let mut vertices = vec![center];
        for k in 0..=CYLINDER_SEGMENTS {
            let phi = k as f32 * TAU / CYLINDER_SEGMENTS as f32;
            let offset = if in_xz {
                Vector3::new(phi.cos() * radius, 0.0, phi.sin() * radius)
            } else {
                Vector3::new(phi.cos() * radius, phi.sin() * radius, 0.0)
            };
            vertices.push(center + offset);
        }
        let indices = (0..CYLINDER_SEGMENTS)
            .map(|k| [0, (k + 1) as u16, (k + 2) as u16])
            .collect();
        (vertices, indices)
    }

    fn cap(&self, top: bool) -> Panel {
        let half_h = self.height / 2.0;
        let (y, tilt, lift) = if top {
            (half_h, -FRAC_PI_2, self.radius)
        } else {
            (-half_h, FRAC_PI_2, -self.radius)
        };
        let pivot = Point3::new(0.0, y, 0.0);
        let (local, indices) = Self::disc(Point3::origin(), self.radius, true);
        let unfolded = Pose::new(
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), tilt),
            Vector3::new(0.0, lift, 0.0),
        );
        Panel::new(local, indices, pivot, unfolded, None)
    }

    fn net(&self) -> Vec<NetPiece> {
        let half_c = self.circumference() / 2.0;
        let half_h = self.height / 2.0;
        let rect = NetPiece::new(
            vec![
                Point3::new(-half_c, -half_h, NET_LIFT),
                Point3::new(half_c, -half_h, NET_LIFT),
                Point3::new(half_c, half_h, NET_LIFT),
                Point3::new(-half_c, half_h, NET_LIFT),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        let (top_v, top_i) = Self::disc(
            Point3::new(0.0, half_h + self.radius, NET_LIFT),
            self.radius,
            false,
        );
        let (bottom_v, bottom_i) = Self::disc(
            Point3::new(0.0, -(half_h + self.radius), NET_LIFT),
            self.radius,
            false,
        );
        vec![
            rect,
            NetPiece::new(top_v, top_i),
            NetPiece::new(bottom_v, bottom_i),
        ]
    }
}

impl Shape for Cylinder {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cylinder
    }

    fn build(&self) -> Result<ShapeGeometry> {
        validate_positive(&[("radius", self.radius), ("height", self.height)])?;

        let mut panels: Vec<Panel> = (0..CYLINDER_SEGMENTS)
            .map(|i| self.lateral_panel(i))
            .collect();
        panels.push(self.cap(true));
        panels.push(self.cap(false));

        Ok(ShapeGeometry::new(panels, self.net()))
    }

    fn hinges(&self) -> Vec<Hinge> {
        let step = TAU / CYLINDER_SEGMENTS as f32;
        let half_h = self.height / 2.0;
        let mut hinges: Vec<Hinge> = (0..CYLINDER_SEGMENTS)
            .map(|i| {
                let theta = i as f32 * step;
                Hinge::along_edge(
                    self.rim_point(theta, -half_h),
                    self.rim_point(theta, half_h),
                )
            })
            .collect();
        // Caps roll over the rim edge parallel to X.
        hinges.push(Hinge::along_edge(
            Point3::new(-self.radius, half_h, 0.0),
            Point3::new(self.radius, half_h, 0.0),
        ));
        hinges.push(Hinge::along_edge(
            Point3::new(-self.radius, -half_h, 0.0),
            Point3::new(self.radius, -half_h, 0.0),
        ));
        hinges
    }

    fn apply_progress(&self, geometry: &mut ShapeGeometry, eased: f32) {
        for panel in &mut geometry.panels {
            let local = panel.local_progress(eased);
            panel.current = panel.unfolded.interpolated(local);
        }
        geometry.crossfade(eased);
    }

    fn labels(&self, unfolded: bool) -> Vec<Label> {
        let half_h = self.height / 2.0;
        if unfolded {
            let half_c = self.circumference() / 2.0;
            vec![
                Label::new(
                    "Height (h)",
                    Point3::new(half_c, 0.0, NET_LIFT),
                    (10.0, 0.0),
                ),
                Label::new(
                    "Radius (r)",
                    Point3::new(self.radius, half_h + self.radius, NET_LIFT),
                    (10.0, 10.0),
                ),
                Label::new(
                    "Top Base (circular)",
                    Point3::new(0.0, half_h + self.radius, NET_LIFT),
                    (10.0, -10.0),
                ),
                Label::new(
                    "Bottom Base (circular)",
                    Point3::new(0.0, -(half_h + self.radius), NET_LIFT),
                    (10.0, 10.0),
                ),
            ]
        } else {
            vec![
                Label::new("Height (h)", Point3::new(self.radius, 0.0, 0.0), (10.0, 0.0)),
                Label::new(
                    "Radius (r)",
                    Point3::new(self.radius * 0.5, -half_h, self.radius * 0.5),
                    (10.0, 10.0),
                ),
                Label::new(
                    "Top Base (circular)",
                    Point3::new(0.0, half_h, 0.0),
                    (10.0, -10.0),
                ),
                Label::new(
                    "Bottom Base (circular)",
                    Point3::new(0.0, -half_h, 0.0),
                    (10.0, 10.0),
                ),
            ]
        }
    }

    fn measurements(&self) -> Measurements {
        let r = self.radius as f64 * CM_PER_UNIT;
        let h = self.height as f64 * CM_PER_UNIT;
        let pi = std::f64::consts::PI;
        let lateral = 2.0 * pi * r * h;
        let v = pi * r * r * h;
        let a = 2.0 * pi * r * (r + h);
        Measurements::new(
            format!("r = {:.0} cm, h = {:.0} cm", r, h),
            vec![
                format!("L = {:.2} cm²", lateral),
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
        Point3::new(4.0, 3.0, 5.0)
    }
}
