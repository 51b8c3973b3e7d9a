//! Configuration for the relationship service

use kinship_domain::Side;
use serde::{Deserialize, Serialize};

/// Which accepted relationships count as "my friends"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendListScope {
    /// Accepted relationships in either direction
    #[default]
    Both,

    /// Only relationships the identity initiated
    Initiated,
}

/// Configuration for the relationship service
///
/// # Examples
///
/// ```
/// use kinship_service::{FriendListScope, LifecycleConfig};
///
/// let config = LifecycleConfig::default();
/// assert_eq!(config.friend_list_scope, FriendListScope::Both);
///
/// let config = LifecycleConfig::legacy();
/// assert_eq!(config.friend_list_scope, FriendListScope::Initiated);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Scope of `list_by_user`
    /// Default: both directions (an accepted relationship is symmetric)
    #[serde(default)]
    pub friend_list_scope: FriendListScope,
}

impl LifecycleConfig {
    /// Initiator-only friend lists, for deployments that depend on the
    /// older asymmetric listing
    pub fn legacy() -> Self {
        Self {
            friend_list_scope: FriendListScope::Initiated,
        }
    }

    /// Side filter used when listing friends
    pub(crate) fn friend_list_side(&self) -> Side {
        match self.friend_list_scope {
            FriendListScope::Both => Side::Either,
            FriendListScope::Initiated => Side::Initiator,
        }
    }
}
