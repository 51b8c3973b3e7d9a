//! Status module - the relationship lifecycle state machine

/// Status of a relationship record
///
/// Records start `Pending` and move to exactly one terminal status:
/// - Pending: requested, awaiting the target's answer
/// - Accepted: both sides are friends
/// - Rejected: the target declined; only resurrection can replace the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipStatus {
    /// Awaiting an answer from the target
    Pending,

    /// Request accepted (terminal)
    Accepted,

    /// Request rejected (terminal)
    Rejected,
}

/// Statuses addressable by the explicit delete operations
pub const ACTIVE_STATUSES: [RelationshipStatus; 2] =
    [RelationshipStatus::Accepted, RelationshipStatus::Pending];

/// What applying a requested status to a record amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The record moves to the given status and must be persisted
    Transition(RelationshipStatus),

    /// The record already sits in a terminal status; nothing changes
    Unchanged(RelationshipStatus),
}

impl RelationshipStatus {
    /// Get the status name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Pending => "pending",
            RelationshipStatus::Accepted => "accepted",
            RelationshipStatus::Rejected => "rejected",
        }
    }

    /// Parse a status from its stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(RelationshipStatus::Pending),
            "accepted" => Some(RelationshipStatus::Accepted),
            "rejected" => Some(RelationshipStatus::Rejected),
            _ => None,
        }
    }

    /// Whether no further transition is possible for this record
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RelationshipStatus::Pending)
    }

    /// Whether the explicit delete operations may address this record
    pub fn is_active(&self) -> bool {
        ACTIVE_STATUSES.contains(self)
    }

    /// Decide what answering a request with `requested` does to a record
    /// currently in `self`.
    ///
    /// Only `Pending` records move. Terminal records stay where they are,
    /// which makes repeated accept/reject calls idempotent.
    pub fn apply(self, requested: RelationshipStatus) -> StatusChange {
        match (self, requested) {
            (RelationshipStatus::Pending, RelationshipStatus::Pending) => {
                StatusChange::Unchanged(RelationshipStatus::Pending)
            }
            (RelationshipStatus::Pending, to) => StatusChange::Transition(to),
            (current, _) => StatusChange::Unchanged(current),
        }
    }
}

impl std::fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relationship status: {}", s))
    }
}
