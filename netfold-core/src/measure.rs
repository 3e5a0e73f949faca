/// Formatted derived measurements exposed to the shell
///
/// Scene units map to centimetres at 10 cm per unit, matching the formula
/// panels of the original visualization.
pub const CM_PER_UNIT: f64 = 10.0;

/// Derived measurements for the current shape parameters, pre-formatted for
/// display. Recomputed on every parameter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurements {
    /// The defining scalars, e.g. `r = 10 cm, h = 20 cm`.
    pub params: String,
    /// Derived quantities (slant height, lateral area, volume, surface area).
    pub lines: Vec<String>,
}

impl Measurements {
    pub fn new(params: String, lines: Vec<String>) -> Self {
        Self { params, lines }
    }
}
