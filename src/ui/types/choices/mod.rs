mod pipeline_params;
mod prompted_choice;
mod transform_choice;

pub use pipeline_params::PipelineParameters;
pub use transform_choice::*;
pub use prompted_choice::PromptedChoice;
