pub mod error;
pub mod record;
pub mod step;

pub use error::{PipelineError, PipelineResult, ResourceRole, Stage, TransformError};
pub use record::Record;
pub use step::Step;
