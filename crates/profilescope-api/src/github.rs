use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Which identity endpoint a lookup goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Users,
    Orgs,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Users => "users",
            Endpoint::Orgs => "orgs",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE.to_string())
    }

    /// For GitHub Enterprise or a local test server
    pub fn with_base_url(token: Option<String>, base_url: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("profilescope/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a user account (`GET /users/{login}`)
    pub async fn get_user(&self, login: &str) -> Result<GitHubAccount> {
        self.get_account(Endpoint::Users, login).await
    }

    /// Fetch an organization account (`GET /orgs/{login}`)
    pub async fn get_org(&self, login: &str) -> Result<GitHubAccount> {
        self.get_account(Endpoint::Orgs, login).await
    }

    async fn get_account(&self, endpoint: Endpoint, login: &str) -> Result<GitHubAccount> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            endpoint.path(),
            urlencoding::encode(login)
        );
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(login.to_string()));
        }

        // GitHub reports an exhausted quota as 403 with a zeroed remaining header
        let quota_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "0")
            .unwrap_or(false);

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || (status == reqwest::StatusCode::FORBIDDEN && quota_exhausted)
        {
            return Err(GitHubError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let account: GitHubAccount = serde_json::from_str(&body)?;
        Ok(account)
    }
}

/// Shared shape of the `/users/{login}` and `/orgs/{login}` payloads
///
/// Only the fields the evaluator reads are kept. Counts are optional
/// because organization payloads do not always carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubAccount {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub public_repos: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub public_gists: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned response per accepted connection and report the request paths
    async fn serve(responses: Vec<String>) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut paths = Vec::new();
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let text = String::from_utf8_lossy(&request).to_string();
                let path = text
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or_default()
                    .to_string();
                paths.push(path);
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            paths
        });

        (format!("http://{}", addr), handle)
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn test_get_user_parses_account() {
        let body = r#"{"login":"octocat","name":"The Octocat","avatar_url":"https://avatars.githubusercontent.com/u/583231","html_url":"https://github.com/octocat","public_repos":8,"followers":4000,"public_gists":8}"#;
        let (base, server) = serve(vec![http_response("200 OK", body)]).await;

        let client = GitHubClient::with_base_url(None, base).unwrap();
        let account = client.get_user("octocat").await.unwrap();

        assert_eq!(account.login, "octocat");
        assert_eq!(account.name.as_deref(), Some("The Octocat"));
        assert_eq!(account.public_repos, Some(8));
        assert_eq!(account.followers, Some(4000));
        assert_eq!(server.await.unwrap(), vec!["/users/octocat".to_string()]);
    }

    #[tokio::test]
    async fn test_get_org_hits_orgs_endpoint() {
        let body = r#"{"login":"github","avatar_url":"https://avatars.githubusercontent.com/u/9919","public_repos":500}"#;
        let (base, server) = serve(vec![http_response("200 OK", body)]).await;

        let client = GitHubClient::with_base_url(None, base).unwrap();
        let account = client.get_org("github").await.unwrap();

        assert_eq!(account.login, "github");
        assert_eq!(account.name, None);
        assert_eq!(account.followers, None);
        assert_eq!(server.await.unwrap(), vec!["/orgs/github".to_string()]);
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let (base, _server) = serve(vec![http_response("404 Not Found", "{}")]).await;

        let client = GitHubClient::with_base_url(None, base).unwrap();
        let result = client.get_user("nobody").await;

        assert!(matches!(result, Err(GitHubError::NotFound(ref login)) if login == "nobody"));
    }

    #[tokio::test]
    async fn test_server_error_is_request_failure() {
        let (base, _server) =
            serve(vec![http_response("502 Bad Gateway", "upstream down")]).await;

        let client = GitHubClient::with_base_url(None, base).unwrap();
        let result = client.get_user("octocat").await;

        match result {
            Err(GitHubError::RequestFailed(msg)) => assert!(msg.contains("502")),
            other => panic!("expected request failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_too_many_requests_is_rate_limit() {
        let (base, _server) = serve(vec![http_response("429 Too Many Requests", "{}")]).await;

        let client = GitHubClient::with_base_url(None, base).unwrap();
        let result = client.get_user("octocat").await;

        assert!(matches!(result, Err(GitHubError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn test_identifier_is_encoded_as_path_segment() {
        let (base, server) = serve(vec![http_response("404 Not Found", "{}")]).await;

        let client = GitHubClient::with_base_url(None, base).unwrap();
        let _ = client.get_user("a b/c").await;

        assert_eq!(server.await.unwrap(), vec!["/users/a%20b%2Fc".to_string()]);
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let client =
            GitHubClient::with_base_url(None, "https://ghe.example.com/api/v3/".to_string())
                .unwrap();
        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    }
}
