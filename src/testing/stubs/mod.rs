pub mod scripted_driver;
pub mod spy;
pub mod spy_reader;
pub mod spy_writer;

pub use scripted_driver::{Answer, ScriptedDriver};
pub use spy::Spy;
pub use spy_reader::SpyReader;
pub use spy_writer::SpyWriter;
