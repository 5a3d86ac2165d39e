use tracing::{debug, info, warn};

use crate::{
    models::{ProfileKind, ProfileRecord, Resolution, ResolvedProfile},
    Error, Result,
};

pub const USER_NOT_FOUND: &str = "profile not found";
pub const ACCOUNT_NOT_FOUND: &str = "profile or organization not found";

/// Where profile records come from
///
/// Implementations must report a missing account as `Error::NotFound`;
/// that is the only error that triggers the organization fallback.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_user(&self, identifier: &str) -> Result<ProfileRecord>;
    async fn fetch_org(&self, identifier: &str) -> Result<ProfileRecord>;
}

/// Resolves an identifier to a user, falling back to an organization
pub struct ProfileResolver {
    source: Box<dyn ProfileSource>,
}

impl ProfileResolver {
    pub fn new(source: Box<dyn ProfileSource>) -> Self {
        Self { source }
    }

    /// Look the identifier up as a user, then as an organization on not-found
    ///
    /// Returns `None` for an empty identifier without touching the network.
    /// Every failure is folded into `Resolution::Failed`.
    pub async fn resolve(&self, identifier: &str) -> Option<Resolution> {
        if identifier.is_empty() {
            debug!("Empty identifier, skipping lookup");
            return None;
        }

        let outcome = match self.source.fetch_user(identifier).await {
            Ok(record) => Resolution::Resolved(ResolvedProfile {
                record,
                kind: ProfileKind::User,
            }),
            Err(Error::NotFound(_)) => {
                debug!("No user named {}, trying organizations", identifier);
                match self.source.fetch_org(identifier).await {
                    Ok(record) => Resolution::Resolved(ResolvedProfile {
                        record,
                        kind: ProfileKind::Organization,
                    }),
                    Err(e) => {
                        warn!("Organization lookup for {} failed: {}", identifier, e);
                        Resolution::Failed(ACCOUNT_NOT_FOUND.to_string())
                    }
                }
            }
            Err(e) => {
                warn!("User lookup for {} failed: {}", identifier, e);
                Resolution::Failed(USER_NOT_FOUND.to_string())
            }
        };

        if let Resolution::Resolved(ref profile) = outcome {
            info!("Resolved {} as {}", profile.record.login, profile.kind);
        }

        Some(outcome)
    }
}
