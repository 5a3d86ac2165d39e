// GitHub provider implementation - bridges the API client with the ProfileSource trait
use async_trait::async_trait;
use profilescope_api::{GitHubAccount, GitHubClient, GitHubError};

use crate::{config::GitHubConfig, models::ProfileRecord, resolver::ProfileSource, Error, Result};

/// Wrapper around GitHubClient that implements ProfileSource
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        let client = GitHubClient::with_base_url(config.token.clone(), config.api_url.clone())
            .map_err(map_api_error)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ProfileSource for GitHubProvider {
    async fn fetch_user(&self, identifier: &str) -> Result<ProfileRecord> {
        let account = self
            .client
            .get_user(identifier)
            .await
            .map_err(map_api_error)?;

        Ok(account_to_record(account))
    }

    async fn fetch_org(&self, identifier: &str) -> Result<ProfileRecord> {
        let account = self
            .client
            .get_org(identifier)
            .await
            .map_err(map_api_error)?;

        Ok(account_to_record(account))
    }
}

fn map_api_error(err: GitHubError) -> Error {
    match err {
        GitHubError::NotFound(login) => Error::NotFound(login),
        other => Error::ApiError(other.to_string()),
    }
}

/// Convert the GitHub API account to our internal ProfileRecord model
fn account_to_record(gh: GitHubAccount) -> ProfileRecord {
    ProfileRecord {
        login: gh.login,
        name: gh.name,
        avatar_url: gh.avatar_url,
        html_url: gh.html_url,
        public_repos: gh.public_repos,
        followers: gh.followers,
        public_gists: gh.public_gists,
    }
}
