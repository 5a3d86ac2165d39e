// Provider implementations backing the resolver
pub mod github;

pub use github::GitHubProvider;
