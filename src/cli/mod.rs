//! Command Line Interface (CLI) layer.
//!
//! This module defines argument parsing (`args`) and the stage dispatch
//! (`runner`). It resolves user-provided options and config files into
//! `ProcessingParams` and hands them to `s2catalogue::api`.
//!
//! If you are embedding the catalogue builder into another application,
//! prefer the high-level `s2catalogue::api` module.
pub mod args;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
