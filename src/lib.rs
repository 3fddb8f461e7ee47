//! Fetch a GitHub user's repositories and summarize them: language histogram,
//! star and fork totals, and the most starred projects.

pub mod config;
pub mod dashboard;
pub mod github;
pub mod report;
pub mod stats;

pub const USER_AGENT: &str = concat!("repolens/", env!("CARGO_PKG_VERSION"));
