//! Successful outcomes: created data or an informational notice

use kinship_domain::RelationshipStatus;
use std::fmt;

/// Informational outcome of an operation that succeeded without (or
/// regardless of) a mutation
///
/// These are deliberately not errors: the caller can safely retry and
/// gets the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The pair already holds an accepted relationship
    AlreadyFriends,

    /// The other side already sent the caller a request
    RequestPendingFromThem,

    /// The caller already sent this request
    RequestAlreadyPending,

    /// A pending request was accepted
    Accepted,

    /// A pending request was rejected
    Rejected,

    /// The request had already been accepted; nothing changed
    AlreadyAccepted,

    /// The request had already been rejected; nothing changed
    AlreadyRejected,
}

impl Notice {
    /// Notice for a record that just moved to `status`
    pub fn answered(status: RelationshipStatus) -> Self {
        match status {
            RelationshipStatus::Accepted => Notice::Accepted,
            RelationshipStatus::Rejected => Notice::Rejected,
            RelationshipStatus::Pending => Notice::RequestAlreadyPending,
        }
    }

    /// Notice for a record that stayed in `status`
    pub fn unchanged(status: RelationshipStatus) -> Self {
        match status {
            RelationshipStatus::Accepted => Notice::AlreadyAccepted,
            RelationshipStatus::Rejected => Notice::AlreadyRejected,
            RelationshipStatus::Pending => Notice::RequestAlreadyPending,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Notice::AlreadyFriends => "you are already friends",
            Notice::RequestPendingFromThem => "they already sent you a friend request",
            Notice::RequestAlreadyPending => "friend request already pending",
            Notice::Accepted => "friend request accepted",
            Notice::Rejected => "friend request rejected",
            Notice::AlreadyAccepted => "friend request was already accepted",
            Notice::AlreadyRejected => "friend request was already rejected",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Success payload: either the data the call produced, or a notice that
/// the desired state already held
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// The operation created `T`
    Created(T),

    /// No mutation; the notice says why
    Info(Notice),
}

impl<T> Reply<T> {
    /// Whether data was created
    pub fn is_created(&self) -> bool {
        matches!(self, Reply::Created(_))
    }

    /// The created data, if any
    pub fn created(&self) -> Option<&T> {
        match self {
            Reply::Created(value) => Some(value),
            Reply::Info(_) => None,
        }
    }

    /// The notice, if no data was created
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Reply::Created(_) => None,
            Reply::Info(notice) => Some(*notice),
        }
    }
}
