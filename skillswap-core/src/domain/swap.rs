//! Swap request domain model and its lifecycle

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::{Error, Result};
use super::skill::Skill;

/// Lifecycle state of a swap request
///
/// ```text
/// pending ──accept──> accepted ──complete──> completed
///    │
///    └──reject──> rejected
/// ```
/// Deleting a pending request removes the record instead of tagging it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapStatus::Rejected | SwapStatus::Completed)
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status-changing action on a swap request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    Accept,
    Reject,
    Complete,
}

impl SwapAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapAction::Accept => "accept",
            SwapAction::Reject => "reject",
            SwapAction::Complete => "complete",
        }
    }

    /// The status this action produces
    pub fn target(&self) -> SwapStatus {
        match self {
            SwapAction::Accept => SwapStatus::Accepted,
            SwapAction::Reject => SwapStatus::Rejected,
            SwapAction::Complete => SwapStatus::Completed,
        }
    }

    /// The only status this action may start from
    fn source(&self) -> SwapStatus {
        match self {
            SwapAction::Accept | SwapAction::Reject => SwapStatus::Pending,
            SwapAction::Complete => SwapStatus::Accepted,
        }
    }
}

/// Outcome of applying an action to a request
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The request moved to a new status; holds the replacement record
    Applied(SwapRequest),
    /// The request was already in the action's target status
    Unchanged,
}

/// Which side of a request a user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDirection {
    Sent,
    Received,
}

/// A proposed exchange of one member's skill for another's
///
/// Both skills are snapshots taken at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub skill_offered: Skill,
    pub skill_requested: Skill,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Create a new pending request with a fresh id
    pub fn new(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        skill_offered: Skill,
        skill_requested: Skill,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            skill_offered,
            skill_requested,
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate a freshly built request
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.sender_id.trim().is_empty() || self.receiver_id.trim().is_empty() {
            return Err("sender and receiver are required");
        }
        if self.sender_id == self.receiver_id {
            return Err("cannot request a swap with yourself");
        }
        Ok(())
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    pub fn belongs_to(&self, user_id: &str, direction: RequestDirection) -> bool {
        match direction {
            RequestDirection::Sent => self.sender_id == user_id,
            RequestDirection::Received => self.receiver_id == user_id,
        }
    }

    /// The other party of the request, from `user_id`'s point of view
    pub fn counterpart(&self, user_id: &str) -> &str {
        if self.sender_id == user_id {
            &self.receiver_id
        } else {
            &self.sender_id
        }
    }

    /// Check that `actor` may perform `action` on this request
    pub fn authorize(&self, action: SwapAction, actor: &str) -> Result<()> {
        let allowed = match action {
            SwapAction::Accept | SwapAction::Reject => self.receiver_id == actor,
            SwapAction::Complete => self.involves(actor),
        };
        if allowed {
            Ok(())
        } else {
            Err(Error::unauthorized(format!(
                "user {} may not {} swap request {}",
                actor,
                action.as_str(),
                self.id
            )))
        }
    }

    /// Check that `actor` may delete this request
    pub fn authorize_delete(&self, actor: &str) -> Result<()> {
        if self.sender_id != actor {
            return Err(Error::unauthorized(format!(
                "only the sender may delete swap request {}",
                self.id
            )));
        }
        if self.status != SwapStatus::Pending {
            return Err(Error::invalid_transition(format!(
                "swap request {} is {} and can no longer be deleted",
                self.id, self.status
            )));
        }
        Ok(())
    }

    /// Apply `action`, producing a whole replacement record.
    ///
    /// Re-applying the action that produced the current status is a no-op.
    /// Any other move out of a status the action does not start from fails
    /// and leaves `self` as it was.
    pub fn apply(&self, action: SwapAction) -> Result<Transition> {
        if self.status == action.target() {
            return Ok(Transition::Unchanged);
        }
        if self.status != action.source() {
            return Err(Error::invalid_transition(format!(
                "cannot {} swap request {}: status is {}",
                action.as_str(),
                self.id,
                self.status
            )));
        }
        Ok(Transition::Applied(SwapRequest {
            status: action.target(),
            updated_at: Utc::now(),
            ..self.clone()
        }))
    }
}
