pub mod client;
pub mod fetch;
pub mod repo;

pub use client::{HttpTransport, Page, Transport};
pub use fetch::{fetch_all, fetch_resource};
pub use repo::{GitHubRepo, DEFAULT_API_URL};
