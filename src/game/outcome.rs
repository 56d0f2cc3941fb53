use std::fmt;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    Wall,
    SelfCollision,
    UnverifiedFraud,
    SecurityCollapse,
    TimeUp,
    TargetReached,
}

impl EndReason {
    /// Human-readable reason reported to the player
    pub fn message(&self) -> &'static str {
        match self {
            EndReason::Wall => "Hit the wall.",
            EndReason::SelfCollision => "Hit yourself.",
            EndReason::UnverifiedFraud => "A fraud-proof L2 was eaten before verification.",
            EndReason::SecurityCollapse => {
                "Security collapse: too many powered L2s in a short window."
            }
            EndReason::TimeUp => "Time ran out.",
            EndReason::TargetReached => "Target score reached before time ran out.",
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, EndReason::TargetReached)
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Final result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub reason: EndReason,
    pub final_score: u32,
}

/// Health of the run with respect to recent powered food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityStatus {
    Stable,
    Shaky,
}

impl SecurityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SecurityStatus::Stable => "Stable",
            SecurityStatus::Shaky => "Shaky",
        }
    }
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_messages() {
        assert_eq!(EndReason::Wall.to_string(), "Hit the wall.");
        assert_eq!(EndReason::SelfCollision.to_string(), "Hit yourself.");
        assert_eq!(EndReason::TimeUp.to_string(), "Time ran out.");
        assert_eq!(
            EndReason::SecurityCollapse.to_string(),
            "Security collapse: too many powered L2s in a short window."
        );
    }

    #[test]
    fn test_only_target_is_a_win() {
        assert!(EndReason::TargetReached.is_win());
        assert!(!EndReason::TimeUp.is_win());
        assert!(!EndReason::UnverifiedFraud.is_win());
    }
}
