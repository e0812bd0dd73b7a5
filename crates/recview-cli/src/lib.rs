// recview CLI
//
// Bundles are read whole: a recording, the metadata of the recorded process
// and whatever source files the capture side collected. Nothing is written
// back except regenerated style sheets, which live in the temp directory
// until the viewer exits.

mod args;
pub mod bundle;
mod commands;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
