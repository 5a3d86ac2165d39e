// API client for the GitHub identity endpoints
pub mod github;

pub use github::{GitHubAccount, GitHubClient, GitHubError, GITHUB_API_BASE};
