/// Netfold Web - WASM bindings for the unfold animation engine
///
/// Exposes one `ShapeViewer` per canvas: the JS shell feeds it elapsed time
/// and commands, and pulls flat triangle/label/measurement data back out each
/// frame to draw however it likes.

use netfold_core::{parse_shape, ShapeKind, ShapeView};
use wasm_bindgen::prelude::*;
use web_sys::console;

#[wasm_bindgen]
pub struct ShapeViewer {
    view: ShapeView,
    kind: ShapeKind,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl ShapeViewer {
    /// Build a viewer from a shape descriptor such as `"cone r=1 h=2"`.
    #[wasm_bindgen(constructor)]
    pub fn new(descriptor: &str, width: u32, height: u32) -> Result<ShapeViewer, JsValue> {
        let shape =
            parse_shape(descriptor).map_err(|err| JsValue::from_str(&err.to_string()))?;
        let kind = shape.kind();
        let view = ShapeView::new(shape, width, height)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        console::log_1(&format!("netfold: loaded {}", kind.name()).into());
        Ok(Self {
            view,
            kind,
            width,
            height,
        })
    }

    /// Advance the animation by `dt` seconds of real time.
    pub fn tick(&mut self, dt: f32) {
        self.view.advance(dt);
    }

    pub fn unfold(&mut self) {
        self.view.unfold();
    }

    pub fn fold(&mut self) {
        self.view.fold();
    }

    pub fn toggle_info(&mut self) {
        self.view.toggle_info();
    }

    pub fn increase_size(&mut self) {
        self.view.increase_size();
    }

    pub fn decrease_size(&mut self) {
        self.view.decrease_size();
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.view.reset_view();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.view.set_viewport(width, height);
    }

    /// Swap in a fresh view of another shape with its default parameters.
    /// Nothing survives navigation; the old view is dropped wholesale.
    fn load(&mut self, kind: ShapeKind) -> Result<(), JsValue> {
        self.view = ShapeView::new(kind.default_shape(), self.width, self.height)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.kind = kind;
        console::log_1(&format!("netfold: loaded {}", kind.name()).into());
        Ok(())
    }

    pub fn next_shape(&mut self) -> Result<(), JsValue> {
        self.load(self.kind.next())
    }

    pub fn prev_shape(&mut self) -> Result<(), JsValue> {
        self.load(self.kind.prev())
    }

    pub fn shape_name(&self) -> String {
        self.kind.name().to_string()
    }

    pub fn is_animating(&self) -> bool {
        self.view.is_animating()
    }

    /// Folded-panel triangles as a flat xyz soup, nine floats per triangle.
    /// Empty while the folded group is hidden.
    pub fn solid_positions(&self) -> Vec<f32> {
        let geometry = self.view.geometry();
        if !geometry.solid_visible {
            return Vec::new();
        }
        let mut out = Vec::new();
        for panel in &geometry.panels {
            for triangle in panel.world_triangles() {
                for point in &triangle {
                    out.extend_from_slice(&[point.x, point.y, point.z]);
                }
            }
        }
        out
    }

    /// One opacity per folded-panel triangle, aligned with
    /// `solid_positions`.
    pub fn solid_opacities(&self) -> Vec<f32> {
        let geometry = self.view.geometry();
        if !geometry.solid_visible {
            return Vec::new();
        }
        let mut out = Vec::new();
        for panel in &geometry.panels {
            out.extend(std::iter::repeat(panel.opacity).take(panel.indices.len()));
        }
        out
    }

    /// Net triangles as a flat xyz soup. Empty while the net is hidden.
    pub fn net_positions(&self) -> Vec<f32> {
        let geometry = self.view.geometry();
        if !geometry.net_visible {
            return Vec::new();
        }
        let mut out = Vec::new();
        for piece in &geometry.net {
            for triangle in piece.triangles() {
                for point in &triangle {
                    out.extend_from_slice(&[point.x, point.y, point.z]);
                }
            }
        }
        out
    }

    /// One opacity per net triangle, aligned with `net_positions`.
    pub fn net_opacities(&self) -> Vec<f32> {
        let geometry = self.view.geometry();
        if !geometry.net_visible {
            return Vec::new();
        }
        let mut out = Vec::new();
        for piece in &geometry.net {
            out.extend(std::iter::repeat(piece.opacity).take(piece.indices.len()));
        }
        out
    }

    /// Projected info-label pixel positions, two floats per label, aligned
    /// with `label_texts`. Empty unless the overlay is visible.
    pub fn label_positions(&self) -> Vec<f32> {
        self.view
            .view_frame(self.width, self.height)
            .labels
            .iter()
            .flat_map(|label| [label.x, label.y])
            .collect()
    }

    pub fn label_texts(&self) -> Vec<String> {
        self.view
            .view_frame(self.width, self.height)
            .labels
            .iter()
            .map(|label| label.text.to_string())
            .collect()
    }

    /// The formula panel: parameter line first, derived lines after.
    pub fn measurement_lines(&self) -> Vec<String> {
        let measurements = self.view.measurements();
        let mut lines = vec![measurements.params];
        lines.extend(measurements.lines);
        lines
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console::log_1(&"netfold-web initialized".into());
    Ok(())
}
