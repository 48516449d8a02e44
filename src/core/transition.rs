//! Table of legal phase transitions.

use super::error::TransitionError;
use super::phase::Phase;

/// Check whether the session may move from `from` to `to` (pure).
pub fn can_transition(from: Phase, to: Phase) -> bool {
    matches!(
        (from, to),
        (Phase::Idle, Phase::Playing)
            | (Phase::Playing, Phase::Completed)
            | (Phase::Playing, Phase::Idle)
            | (Phase::Completed, Phase::Idle)
    )
}

/// Like [`can_transition`] but reports the rejected pair.
pub fn check_transition(from: Phase, to: Phase) -> Result<(), TransitionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransitionError::Illegal { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_allowed() {
        assert!(can_transition(Phase::Idle, Phase::Playing));
        assert!(can_transition(Phase::Playing, Phase::Completed));
        assert!(can_transition(Phase::Completed, Phase::Idle));
    }

    #[test]
    fn reset_mid_game_is_allowed() {
        assert!(can_transition(Phase::Playing, Phase::Idle));
    }

    #[test]
    fn shortcuts_are_rejected() {
        assert!(!can_transition(Phase::Idle, Phase::Completed));
        assert!(!can_transition(Phase::Idle, Phase::Idle));
        assert!(!can_transition(Phase::Completed, Phase::Playing));
        assert!(!can_transition(Phase::Playing, Phase::Playing));
        assert!(!can_transition(Phase::Completed, Phase::Completed));
    }

    #[test]
    fn check_transition_names_both_phases() {
        let err = check_transition(Phase::Completed, Phase::Playing).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Illegal phase transition from 'Completed' to 'Playing'"
        );
    }
}
