pub mod config;
pub mod dispatch;
pub mod error;
pub mod github;
pub mod mode;
pub mod request;
pub mod skip;
pub mod workflow;

pub use error::{ReleaseGateError, Result};
