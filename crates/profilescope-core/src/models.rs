use serde::{Deserialize, Serialize};

/// A resolved GitHub account, user or organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    pub public_gists: Option<u64>,
}

impl ProfileRecord {
    pub fn repos(&self) -> u64 {
        self.public_repos.unwrap_or(0)
    }

    pub fn followers(&self) -> u64 {
        self.followers.unwrap_or(0)
    }

    pub fn gists(&self) -> u64 {
        self.public_gists.unwrap_or(0)
    }

    /// Display name, or the fallback text when the account has none
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("not informed")
    }
}

/// Which endpoint the account was resolved from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProfileKind {
    User,
    Organization,
}

impl ProfileKind {
    /// Organizations have no meaningful follower count
    pub fn shows_followers(&self) -> bool {
        matches!(self, ProfileKind::User)
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileKind::User => write!(f, "User"),
            ProfileKind::Organization => write!(f, "Organization"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProfile {
    pub record: ProfileRecord,
    pub kind: ProfileKind,
}

impl ResolvedProfile {
    /// Follower count as it should be shown, `None` for organizations
    pub fn visible_followers(&self) -> Option<u64> {
        self.kind.shows_followers().then(|| self.record.followers())
    }
}

/// Outcome of one lookup sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedProfile),
    Failed(String),
}

impl Resolution {
    pub fn profile(&self) -> Option<&ResolvedProfile> {
        match self {
            Resolution::Resolved(profile) => Some(profile),
            Resolution::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::Failed(message) => Some(message),
        }
    }
}
