pub mod error;
pub mod overlay;
pub mod pipeline;
pub mod runner;
pub mod search;

pub use error::PipelineError;
pub use overlay::{
    build_overlay, Coordinate, DisasterArea, MapOverlay, Marker, MarkerKind, OverlayError,
    ResourcePoint,
};
pub use pipeline::{Capability, Pipeline, Stage};
pub use runner::PipelineRunner;
pub use search::{MockSearch, SerperSearch};
