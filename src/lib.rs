//! Commit, pull request and issue statistics for a GitHub repository.

pub mod cli;
pub mod credentials;
pub mod error;
pub mod error_log;
pub mod github;
pub mod model;
pub mod report;
pub mod stats;
pub mod util;
