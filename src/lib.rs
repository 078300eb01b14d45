pub mod cli;
pub mod collaborators;
pub mod config;
pub mod domain;
pub mod error;
pub mod git_ops;
pub mod manifest;
pub mod observability;
pub mod process;
pub mod settings;
pub mod ui;
pub mod warnings;

pub use error::{NpError, Result};
