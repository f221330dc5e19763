//! Replay two folders (or two requests) of saved HTTP requests through an
//! API-client host and diff their response bodies into an HTML report.

pub mod config;
pub mod diff;
pub mod error;
pub mod execution;
pub mod host;
pub mod logging;
pub mod pairing;
pub mod render;
pub mod report;
pub mod resource;
pub mod theme;
pub mod workflow;

pub use error::{DiffError, Result};
