/// Per-shape view state: geometry, animation driver, camera and info overlay
use nalgebra::Point3;
use tracing::debug;

use crate::driver::{AnimationState, Terminal};
use crate::error::Result;
use crate::geometry::ShapeGeometry;
use crate::measure::Measurements;
use crate::projection::Camera;
use crate::shapes::{Shape, ShapeKind};

/// An info label: fixed text anchored at a point in the solid's local frame,
/// nudged by a pixel offset after projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: &'static str,
    pub anchor: Point3<f32>,
    pub offset: (f32, f32),
}

impl Label {
    pub fn new(text: &'static str, anchor: Point3<f32>, offset: (f32, f32)) -> Self {
        Self {
            text,
            anchor,
            offset,
        }
    }
}

/// A label projected into pixel coordinates for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub text: &'static str,
    pub x: f32,
    pub y: f32,
}

/// The dependent view data derived per frame, never persisted.
#[derive(Debug, Clone, Default)]
pub struct ViewFrame {
    pub labels: Vec<LabelPlacement>,
}

/// Everything owned by one on-screen shape instance. Constructed when a
/// shape is loaded and replaced wholesale on navigation, so no state leaks
/// between shapes.
pub struct ShapeView {
    shape: Box<dyn Shape>,
    geometry: ShapeGeometry,
    driver: AnimationState,
    camera: Camera,
    show_info: bool,
}

impl ShapeView {
    pub fn new(shape: Box<dyn Shape>, width: u32, height: u32) -> Result<Self> {
        let geometry = shape.build()?;
        let driver = AnimationState::new(shape.rate());
        let camera = Camera::new(width, height, shape.home_camera());
        Ok(Self {
            shape,
            geometry,
            driver,
            camera,
            show_info: false,
        })
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_animating(&self) -> bool {
        !self.driver.is_idle()
    }

    pub fn measurements(&self) -> Measurements {
        self.shape.measurements()
    }

    /// Start unfolding. Also hides the info overlay, which only makes sense
    /// over a resting shape.
    pub fn unfold(&mut self) {
        if !self.driver.unfold() {
            return;
        }
        self.geometry.begin_animation();
        self.show_info = false;
    }

    pub fn fold(&mut self) {
        if !self.driver.fold() {
            return;
        }
        self.geometry.begin_animation();
    }

    /// Toggle the info overlay; ignored while an animation is in flight.
    pub fn toggle_info(&mut self) {
        if !self.driver.is_idle() {
            debug!("info toggle ignored while animating");
            return;
        }
        self.show_info = !self.show_info;
    }

    pub fn increase_size(&mut self) {
        if self.shape.increase_size() {
            self.rebuild();
        }
    }

    pub fn decrease_size(&mut self) {
        if self.shape.decrease_size() {
            self.rebuild();
        }
    }

    /// Replace the geometry after a parameter change, re-applying the
    /// current progress so a mid-animation resize does not reset the fold
    /// state.
    fn rebuild(&mut self) {
        match self.shape.build() {
            Ok(mut geometry) => {
                self.shape.apply_progress(&mut geometry, self.driver.eased());
                if self.driver.is_unfolded() {
                    geometry.snap_unfolded();
                } else if self.driver.is_folded() {
                    geometry.snap_folded();
                } else {
                    geometry.begin_animation();
                }
                self.geometry = geometry;
            }
            // Unreachable with clamped size steps; keep the old geometry.
            Err(err) => debug!("rebuild skipped: {err}"),
        }
    }

    /// Advance the animation by `dt` seconds and propagate the new progress
    /// into the geometry. Terminal frames snap to exact poses.
    pub fn advance(&mut self, dt: f32) {
        match self.driver.advance(dt) {
            Some(Terminal::Unfolded) => self.geometry.snap_unfolded(),
            Some(Terminal::Folded) => self.geometry.snap_folded(),
            None => {
                if !self.driver.is_idle() {
                    self.shape
                        .apply_progress(&mut self.geometry, self.driver.eased());
                }
            }
        }
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.camera.reset_view();
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    /// Project the info labels for this frame. Labels only render over a
    /// resting shape with the overlay on; off-frustum anchors are dropped.
    pub fn view_frame(&self, width: u32, height: u32) -> ViewFrame {
        if !self.show_info || !self.driver.is_idle() {
            return ViewFrame::default();
        }
        let labels = self
            .shape
            .labels(self.driver.is_unfolded())
            .into_iter()
            .filter_map(|label| {
                self.camera
                    .project_to_screen(&label.anchor, width, height)
                    .map(|(x, y, _)| LabelPlacement {
                        text: label.text,
                        x: x + label.offset.0,
                        y: y + label.offset.1,
                    })
            })
            .collect();
        ViewFrame { labels }
    }
}
