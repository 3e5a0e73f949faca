/// Netfold Core Library - Unfold/fold animation engine for geometric solids
///
/// This library provides the shell-agnostic core: shape geometry built from
/// parameters, hinge poses, the time-based animation driver, and the derived
/// view data (projected labels, measurements) that any front end can render.

pub mod driver;
pub mod ease;
pub mod error;
pub mod geometry;
pub mod hinge;
pub mod measure;
pub mod parse;
pub mod projection;
pub mod shapes;
pub mod view;

// Re-export commonly used types
pub use driver::{AnimationState, Direction, Terminal};
pub use error::{Error, Result};
pub use geometry::{NetPiece, Panel, ShapeGeometry};
pub use hinge::{Hinge, Pose};
pub use measure::Measurements;
pub use parse::parse_shape;
pub use projection::Camera;
pub use shapes::{Cone, Cube, Cylinder, Pyramid, Shape, ShapeKind};
pub use view::{Label, LabelPlacement, ShapeView, ViewFrame};
