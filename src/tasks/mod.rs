pub mod pipeline;
pub mod stop;
pub mod stream_writer;
pub mod summary;

pub use pipeline::{Pipeline, run, run_many, run_streams};
pub use stop::StopFlag;
pub use stream_writer::StreamWriter;
pub use summary::RunSummary;
