//! Game phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete stage of a game session.
///
/// `Idle` covers both "maze ready" and "no maze yet"; whether a maze is
/// loaded is tracked by the session, not by the phase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Completed,
}

impl Phase {
    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Playing => "Playing",
            Self::Completed => "Completed",
        }
    }

    /// Directional input is only accepted while playing.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// The attempt is over; only a reset leaves this phase.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_playing_accepts_input() {
        assert!(!Phase::Idle.accepts_input());
        assert!(Phase::Playing.accepts_input());
        assert!(!Phase::Completed.accepts_input());
    }

    #[test]
    fn completed_is_final() {
        assert!(!Phase::Idle.is_final());
        assert!(!Phase::Playing.is_final());
        assert!(Phase::Completed.is_final());
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }

    #[test]
    fn phase_serializes_by_name() {
        let json = serde_json::to_string(&Phase::Playing).unwrap();
        assert_eq!(json, "\"Playing\"");
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Phase::Playing);
    }
}
