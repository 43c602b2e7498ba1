//! Swap service - swap request lifecycle
//!
//! Swap requests live in this client's `swap-requests-storage` partition.
//! The server's `/swap-requests` endpoints are not used, so a request is
//! only visible in the data directory it was created in.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{RequestDirection, Skill, SwapAction, SwapRequest, Transition};
use crate::ports::{PartitionStore, SWAP_REQUESTS_PARTITION};
use crate::store::PersistedSnapshot;

/// What a lifecycle call did
#[derive(Debug, Clone, PartialEq)]
pub enum SwapOutcome {
    /// Record replaced; holds the new version
    Updated(SwapRequest),
    /// The request already had the requested status
    Unchanged(SwapRequest),
}

impl SwapOutcome {
    pub fn request(&self) -> &SwapRequest {
        match self {
            SwapOutcome::Updated(r) | SwapOutcome::Unchanged(r) => r,
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, SwapOutcome::Updated(_))
    }
}

pub struct SwapService {
    requests: PersistedSnapshot<Vec<SwapRequest>>,
}

impl SwapService {
    pub fn new(store: Arc<dyn PartitionStore>) -> Result<Self> {
        Ok(Self {
            requests: PersistedSnapshot::load(store, SWAP_REQUESTS_PARTITION)?,
        })
    }

    /// Create a pending request from `sender_id` to `receiver_id`
    pub fn create(
        &self,
        sender_id: &str,
        receiver_id: &str,
        skill_offered: Skill,
        skill_requested: Skill,
    ) -> Result<SwapRequest> {
        let request = SwapRequest::new(sender_id, receiver_id, skill_offered, skill_requested);
        request.validate().map_err(Error::validation)?;

        self.requests.replace(|current| {
            let mut next = current.clone();
            next.push(request.clone());
            Ok((next, request))
        })
    }

    pub fn accept(&self, id: &str, actor: &str) -> Result<SwapOutcome> {
        self.transition(id, actor, SwapAction::Accept)
    }

    pub fn reject(&self, id: &str, actor: &str) -> Result<SwapOutcome> {
        self.transition(id, actor, SwapAction::Reject)
    }

    pub fn complete(&self, id: &str, actor: &str) -> Result<SwapOutcome> {
        self.transition(id, actor, SwapAction::Complete)
    }

    fn transition(&self, id: &str, actor: &str, action: SwapAction) -> Result<SwapOutcome> {
        self.requests.replace(|current| {
            let index = current
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| Error::not_found(format!("swap request {}", id)))?;
            let request = &current[index];
            request.authorize(action, actor)?;

            match request.apply(action)? {
                Transition::Unchanged => {
                    Ok((current.clone(), SwapOutcome::Unchanged(request.clone())))
                }
                Transition::Applied(updated) => {
                    let mut next = current.clone();
                    next[index] = updated.clone();
                    Ok((next, SwapOutcome::Updated(updated)))
                }
            }
        })
    }

    /// Remove a pending request. Unknown ids are a no-op and return false.
    pub fn delete(&self, id: &str, actor: &str) -> Result<bool> {
        if !self.requests.snapshot().iter().any(|r| r.id == id) {
            return Ok(false);
        }

        // Checked against the snapshot the removal is built from
        self.requests.replace(|current| {
            match current.iter().find(|r| r.id == id) {
                None => return Ok((current.clone(), false)),
                Some(request) => request.authorize_delete(actor)?,
            }
            let next: Vec<SwapRequest> = current.iter().filter(|r| r.id != id).cloned().collect();
            Ok((next, true))
        })
    }

    pub fn get(&self, id: &str) -> Option<SwapRequest> {
        self.requests.snapshot().iter().find(|r| r.id == id).cloned()
    }

    /// Requests sent or received by `user_id`, insertion order
    pub fn requests_for_user(&self, user_id: &str, direction: RequestDirection) -> Vec<SwapRequest> {
        self.requests
            .snapshot()
            .iter()
            .filter(|r| r.belongs_to(user_id, direction))
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<SwapRequest> {
        self.requests.snapshot().to_vec()
    }
}
