//! Status step indicator.
//!
//! Recomputes the delivery progress stepper from scratch for a given
//! current status. Because the computation is a pure function of the
//! status, applying the same `orderUpdated` event any number of times
//! yields the same visual state, and a fresh page load derives an
//! identical stepper from the stored record.

use crate::domain::OrderStatus;

/// Visual state of one stage in the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    /// The stage has been reached (includes the current stage).
    Completed,
    /// The immediately upcoming stage.
    InProgress,
    /// Not yet reached.
    Pending,
}

/// Computes the stepper for the given current status.
///
/// Scans [`OrderStatus::STAGES`] in lifecycle order: every stage up to and
/// including the match is `Completed`, the stage immediately after the
/// match is `InProgress`, and the rest stay `Pending`. The terminal stage
/// therefore leaves nothing in progress.
#[must_use]
pub fn stage_states(current: OrderStatus) -> Vec<(OrderStatus, StageState)> {
    let reached = current.position();
    OrderStatus::STAGES
        .iter()
        .enumerate()
        .map(|(index, stage)| {
            let state = if index <= reached {
                StageState::Completed
            } else if index == reached + 1 {
                StageState::InProgress
            } else {
                StageState::Pending
            };
            (*stage, state)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn states(current: OrderStatus) -> Vec<StageState> {
        stage_states(current).into_iter().map(|(_, s)| s).collect()
    }

    #[test]
    fn placed_completes_first_stage_only() {
        assert_eq!(
            states(OrderStatus::OrderPlaced),
            vec![
                StageState::Completed,
                StageState::InProgress,
                StageState::Pending,
                StageState::Pending,
                StageState::Pending,
            ]
        );
    }

    #[test]
    fn mid_lifecycle_marks_prefix_completed() {
        assert_eq!(
            states(OrderStatus::OutOfDelivery),
            vec![
                StageState::Completed,
                StageState::Completed,
                StageState::Completed,
                StageState::InProgress,
                StageState::Pending,
            ]
        );
    }

    #[test]
    fn delivered_completes_everything_with_nothing_in_progress() {
        let states = states(OrderStatus::Delivered);
        assert!(states.iter().all(|s| *s == StageState::Completed));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let once = stage_states(OrderStatus::Delivered);
        let twice = stage_states(OrderStatus::Delivered);
        assert_eq!(once, twice);
    }
}
