mod error;
mod pipeline;
mod transforms;

pub use error::BuildError;

pub use pipeline::build_pipeline;
pub use transforms::{BoxedTransform, build_transform};
