/// The four unfoldable solids behind one shared capability
use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::geometry::ShapeGeometry;
use crate::hinge::Hinge;
use crate::measure::Measurements;
use crate::view::Label;

pub mod cone;
pub mod cube;
pub mod cylinder;
pub mod pyramid;

pub use cone::Cone;
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use pyramid::Pyramid;

/// Which solid a view is showing; also the navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Cone,
    Cylinder,
    Pyramid,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Cone => "cone",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Pyramid => "pyramid",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ShapeKind::Cube => ShapeKind::Cone,
            ShapeKind::Cone => ShapeKind::Cylinder,
            ShapeKind::Cylinder => ShapeKind::Pyramid,
            ShapeKind::Pyramid => ShapeKind::Cube,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ShapeKind::Cube => ShapeKind::Pyramid,
            ShapeKind::Cone => ShapeKind::Cube,
            ShapeKind::Cylinder => ShapeKind::Cone,
            ShapeKind::Pyramid => ShapeKind::Cylinder,
        }
    }

    /// A fresh shape with its default parameters.
    pub fn default_shape(self) -> Box<dyn Shape> {
        match self {
            ShapeKind::Cube => Box::new(Cube::default()),
            ShapeKind::Cone => Box::new(Cone::default()),
            ShapeKind::Cylinder => Box::new(Cylinder::default()),
            ShapeKind::Pyramid => Box::new(Pyramid::default()),
        }
    }
}

/// Capability shared by all four solids: panel construction, hinge
/// derivation and progress application. The animation driver and the
/// dependent-view sync are shared verbatim on top of this.
pub trait Shape {
    fn kind(&self) -> ShapeKind;

    /// Build panels, hinge poses and auxiliary net geometry from the current
    /// parameters. Pure function of the parameters; non-positive sizes are a
    /// precondition violation and construction does not proceed.
    fn build(&self) -> Result<ShapeGeometry>;

    /// One hinge per hinged panel, in panel order.
    fn hinges(&self) -> Vec<Hinge>;

    /// Interpolate every panel toward its unfolded pose for the given eased
    /// progress and update the crossfade opacities.
    fn apply_progress(&self, geometry: &mut ShapeGeometry, eased: f32);

    /// Info labels anchored in the solid's local frame. `unfolded` selects
    /// the anchor set for shapes whose net has its own label positions.
    fn labels(&self, unfolded: bool) -> Vec<Label>;

    /// Formatted derived measurements for the current parameters.
    fn measurements(&self) -> Measurements;

    /// Grow by one size step. Returns false (and changes nothing) when the
    /// parameters are already at the upper bound.
    fn increase_size(&mut self) -> bool;

    /// Shrink by one size step. Returns false when at the lower bound.
    fn decrease_size(&mut self) -> bool;

    /// Animation rate in progress units per second.
    fn rate(&self) -> f32;

    /// The shape's initial camera position.
    fn home_camera(&self) -> Point3<f32>;
}

pub(crate) fn validate_positive(fields: &[(&str, f32)]) -> Result<()> {
    for (name, value) in fields {
        if !(*value > 0.0) {
            return Err(Error::InvalidParameters(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_cycles_all_shapes() {
        let mut kind = ShapeKind::Cube;
        for _ in 0..4 {
            kind = kind.next();
        }
        assert_eq!(kind, ShapeKind::Cube);
        assert_eq!(ShapeKind::Cube.prev(), ShapeKind::Pyramid);
        assert_eq!(ShapeKind::Cone.next().prev(), ShapeKind::Cone);
    }

    #[test]
    fn test_validate_positive_rejects_nonpositive() {
        assert!(validate_positive(&[("radius", 1.0)]).is_ok());
        assert!(validate_positive(&[("radius", 0.0)]).is_err());
        assert!(validate_positive(&[("radius", 1.0), ("height", -2.0)]).is_err());
    }
}
