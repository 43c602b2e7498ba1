//! Status service - local state summary

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::SwapStatus;
use crate::services::directory::DirectoryService;
use crate::services::feedback::FeedbackService;
use crate::services::session::SessionService;
use crate::services::swap::SwapService;

pub struct StatusService {
    directory: Arc<DirectoryService>,
    session: Arc<SessionService>,
    swaps: Arc<SwapService>,
    feedback: Arc<FeedbackService>,
}

impl StatusService {
    pub fn new(
        directory: Arc<DirectoryService>,
        session: Arc<SessionService>,
        swaps: Arc<SwapService>,
        feedback: Arc<FeedbackService>,
    ) -> Self {
        Self {
            directory,
            session,
            swaps,
            feedback,
        }
    }

    pub fn get_status(&self) -> Result<StatusSummary> {
        let users = self.directory.all_users();
        let requests = self.swaps.all();
        let count = |status: SwapStatus| requests.iter().filter(|r| r.status == status).count();

        let current_user = self.session.current_user().map(|u| CurrentUserSummary {
            received_feedback: self.feedback.get_user_feedbacks(&u.id).len(),
            skills_offered: u.skills_offered.len(),
            skills_wanted: u.skills_wanted.len(),
            is_public: u.is_public,
            id: u.id,
            name: u.name,
        });

        Ok(StatusSummary {
            authenticated: self.session.is_authenticated(),
            current_user,
            total_users: users.len(),
            public_users: users.iter().filter(|u| u.is_public).count(),
            swap_requests: SwapCounts {
                total: requests.len(),
                pending: count(SwapStatus::Pending),
                accepted: count(SwapStatus::Accepted),
                rejected: count(SwapStatus::Rejected),
                completed: count(SwapStatus::Completed),
            },
            total_feedback: self.feedback.count(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub authenticated: bool,
    pub current_user: Option<CurrentUserSummary>,
    pub total_users: usize,
    pub public_users: usize,
    pub swap_requests: SwapCounts,
    pub total_feedback: usize,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserSummary {
    pub id: String,
    pub name: String,
    pub is_public: bool,
    pub skills_offered: usize,
    pub skills_wanted: usize,
    pub received_feedback: usize,
}

#[derive(Debug, Serialize)]
pub struct SwapCounts {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub completed: usize,
}
