//! Feedback service - ratings left after swaps

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{validate_rating, Feedback, RatingSummary, SwapStatus};
use crate::ports::{PartitionStore, FEEDBACKS_PARTITION};
use crate::services::swap::SwapService;
use crate::store::PersistedSnapshot;

/// Input for a new feedback record
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub swap_request_id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub rating: u8,
    pub comment: String,
}

pub struct FeedbackService {
    feedbacks: PersistedSnapshot<Vec<Feedback>>,
    swaps: Arc<SwapService>,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn PartitionStore>, swaps: Arc<SwapService>) -> Result<Self> {
        Ok(Self {
            feedbacks: PersistedSnapshot::load(store, FEEDBACKS_PARTITION)?,
            swaps,
        })
    }

    /// Append a feedback record with a fresh id.
    ///
    /// The rating must be 1-5. If the swap is known locally it has to be
    /// completed and both users have to be its parties. Several records for
    /// the same swap are allowed.
    pub fn add_feedback(&self, input: NewFeedback) -> Result<Feedback> {
        validate_rating(input.rating).map_err(Error::Validation)?;
        if input.from_user_id == input.to_user_id {
            return Err(Error::validation("cannot leave feedback for yourself"));
        }
        if let Some(swap) = self.swaps.get(&input.swap_request_id) {
            if !swap.involves(&input.from_user_id) || !swap.involves(&input.to_user_id) {
                return Err(Error::unauthorized(format!(
                    "feedback on swap request {} must be between its two parties",
                    swap.id
                )));
            }
            if swap.status != SwapStatus::Completed {
                return Err(Error::invalid_transition(format!(
                    "swap request {} is {}; feedback needs a completed swap",
                    swap.id, swap.status
                )));
            }
        }

        self.append(Feedback::new(
            input.swap_request_id,
            input.from_user_id,
            input.to_user_id,
            input.rating,
            input.comment,
        ))
    }

    /// Store a record as-is, with no rating check
    pub(crate) fn append(&self, feedback: Feedback) -> Result<Feedback> {
        self.feedbacks.replace(|current| {
            let mut next = current.clone();
            next.push(feedback.clone());
            Ok((next, feedback))
        })
    }

    /// Feedback received by `user_id`, insertion order
    pub fn get_user_feedbacks(&self, user_id: &str) -> Vec<Feedback> {
        self.feedbacks
            .snapshot()
            .iter()
            .filter(|f| f.to_user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn rating_summary(&self, user_id: &str) -> RatingSummary {
        let feedbacks = self.feedbacks.snapshot();
        RatingSummary::from_feedbacks(feedbacks.iter().filter(|f| f.to_user_id == user_id))
    }

    pub fn count(&self) -> usize {
        self.feedbacks.snapshot().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Skill;
    use crate::store::testing::MemoryPartitionStore;

    fn services() -> (Arc<SwapService>, FeedbackService) {
        let store: Arc<dyn PartitionStore> = Arc::new(MemoryPartitionStore::default());
        let swaps = Arc::new(SwapService::new(store.clone()).unwrap());
        let feedback = FeedbackService::new(store, swaps.clone()).unwrap();
        (swaps, feedback)
    }

    fn input(swap: &str, from: &str, to: &str, rating: u8) -> NewFeedback {
        NewFeedback {
            swap_request_id: swap.to_string(),
            from_user_id: from.to_string(),
            to_user_id: to.to_string(),
            rating,
            comment: "Patient and clear".to_string(),
        }
    }

    #[test]
    fn test_add_then_list_returns_that_record() {
        let (_, svc) = services();
        let added = svc.add_feedback(input("sw1", "u1", "u2", 5)).unwrap();

        let received = svc.get_user_feedbacks("u2");
        assert_eq!(received, vec![added]);
        assert!(svc.get_user_feedbacks("u1").is_empty());
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let (_, svc) = services();
        assert!(matches!(
            svc.add_feedback(input("sw1", "u1", "u2", 0)),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            svc.add_feedback(input("sw1", "u1", "u2", 6)),
            Err(Error::Validation(_))
        ));
        assert_eq!(svc.count(), 0);
    }

    #[test]
    fn test_store_layer_keeps_raw_rating() {
        let (_, svc) = services();
        svc.append(Feedback::new("sw1", "u1", "u2", 9, "")).unwrap();
        assert_eq!(svc.get_user_feedbacks("u2")[0].rating, 9);
    }

    fn completed_swap(swaps: &SwapService) -> String {
        let swap = swaps
            .create("u1", "u2", Skill::new("s1", "Guitar", ""), Skill::new("s2", "Yoga", ""))
            .unwrap();
        swaps.accept(&swap.id, "u2").unwrap();
        swaps.complete(&swap.id, "u1").unwrap();
        swap.id
    }

    #[test]
    fn test_feedback_needs_completed_swap() {
        let (swaps, svc) = services();
        let swap = swaps
            .create("u1", "u2", Skill::new("s1", "Guitar", ""), Skill::new("s2", "Yoga", ""))
            .unwrap();
        assert!(matches!(
            svc.add_feedback(input(&swap.id, "u1", "u2", 5)),
            Err(Error::InvalidTransition(_))
        ));

        swaps.accept(&swap.id, "u2").unwrap();
        assert!(matches!(
            svc.add_feedback(input(&swap.id, "u2", "u1", 4)),
            Err(Error::InvalidTransition(_))
        ));

        let rejected = swaps
            .create("u1", "u2", Skill::new("s1", "Guitar", ""), Skill::new("s2", "Yoga", ""))
            .unwrap();
        swaps.reject(&rejected.id, "u2").unwrap();
        assert!(matches!(
            svc.add_feedback(input(&rejected.id, "u2", "u1", 1)),
            Err(Error::InvalidTransition(_))
        ));
        assert_eq!(svc.count(), 0);

        swaps.complete(&swap.id, "u1").unwrap();
        assert!(svc.add_feedback(input(&swap.id, "u1", "u2", 5)).is_ok());
    }

    #[test]
    fn test_author_must_be_party_of_known_swap() {
        let (swaps, svc) = services();
        let swap_id = completed_swap(&swaps);

        assert!(matches!(
            svc.add_feedback(input(&swap_id, "u3", "u2", 4)),
            Err(Error::Unauthorized(_))
        ));
        assert!(svc.add_feedback(input(&swap_id, "u2", "u1", 4)).is_ok());
    }

    #[test]
    fn test_duplicates_allowed_and_summarized() {
        let (_, svc) = services();
        svc.add_feedback(input("sw1", "u1", "u2", 5)).unwrap();
        svc.add_feedback(input("sw1", "u1", "u2", 2)).unwrap();

        let summary = svc.rating_summary("u2");
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, Some(3.5));
        assert_eq!(svc.rating_summary("u9").average, None);
    }
}
