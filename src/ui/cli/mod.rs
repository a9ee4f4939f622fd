pub mod drivers;
pub mod run;
pub mod wizard;

pub use run::execute;
pub use wizard::{prompt_choice, prompt_pipeline};
