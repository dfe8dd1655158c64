//! Command-line front end for the facet validation library.
//!
//! The binary is a thin wrapper around [`cli::run`], which takes its input
//! and output streams as parameters so it can be driven from tests.

pub mod cli;

pub use cli::{run, Args, Status};
