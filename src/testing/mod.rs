pub mod fixtures;
pub mod stubs;

pub use stubs::{Answer, ScriptedDriver, Spy, SpyReader, SpyWriter};
