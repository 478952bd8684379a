//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod ghapi;
mod github;
mod health;
mod metrics;
mod repos;
mod reviews;
pub mod server;
mod stats;


pub use errors::{Result, ServerError};
