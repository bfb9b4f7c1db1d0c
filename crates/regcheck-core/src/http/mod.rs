//! HTTP client for GitHub API

pub mod client;

pub use client::{GitHubApiClient, DEFAULT_API_URL};
