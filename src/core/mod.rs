//! Core domain models
//!
//! The tree the parser builds out of a Jenkinsfile, plus the configuration
//! the workflow renderer reads.

pub mod config;
pub mod environment;
pub mod pipeline;
pub mod stage;
pub mod step;

pub use config::{CredentialMapping, JobGroups, RenderConfig};
pub use environment::*;
pub use pipeline::*;
pub use stage::*;
pub use step::*;
