//! Tooling around [`fragment_config`]: the `merge-config` command line.
//!
//! The binary is a thin shell over [`run`]; every command writes to
//! caller-supplied streams so it can be driven from tests.

pub mod check;
pub mod cli;
pub mod error;
mod fs_helpers;
pub mod output;
pub mod report;
mod run;
pub mod selection;
pub mod settings;

pub use error::{MergeConfigError, Result};
pub use run::run;
