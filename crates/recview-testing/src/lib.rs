//! Testing infrastructure for recview tests.
//!
//! This crate provides utilities for writing robust tests:
//! - `builders`: Fluent construction of call records and recorded values
//! - `locators`: Source locators with scripted or gated completion
//! - `pane`: An enrichment pane that records every mutation
//! - `fixtures`: Recording bundles as written by the capture side
//! - `TestWorld`: Isolated environment for running the CLI

pub mod builders;
pub mod fixtures;
pub mod locators;
pub mod pane;
pub mod world;

pub use builders::{call, values, CallBuilder};
pub use locators::{GatedLocator, StaticLocator};
pub use pane::{PaneEvent, RecordingPane};
pub use world::{CliResult, TestWorld};
