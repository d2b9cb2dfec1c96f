use std::fmt;

/// Discrete trading action for one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Convert all cash into shares
    Buy,
    /// Convert all shares into cash
    Sell,
    /// Leave the position unchanged
    Hold,
}

impl Action {
    /// Label used in the `Signal` column of the per-bar table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision for one bar: the action plus the rationale that produced it
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Decision {
    /// Action to take
    pub action: Action,
    /// Human-readable justification echoing thresholds and observed values
    pub reason: String,
}

impl Decision {
    /// Creates a BUY decision.
    pub fn buy(reason: impl Into<String>) -> Self {
        Self {
            action: Action::Buy,
            reason: reason.into(),
        }
    }

    /// Creates a SELL decision.
    pub fn sell(reason: impl Into<String>) -> Self {
        Self {
            action: Action::Sell,
            reason: reason.into(),
        }
    }

    /// Creates a HOLD decision.
    pub fn hold(reason: impl Into<String>) -> Self {
        Self {
            action: Action::Hold,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization() {
        assert_eq!(serde_json::to_string(&Action::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&Action::Hold).unwrap(), "\"HOLD\"");
    }

    #[test]
    fn test_decision_constructors() {
        let decision = Decision::hold("Hold: warm-up");
        assert_eq!(decision.action, Action::Hold);
        assert_eq!(decision.reason, "Hold: warm-up");
        assert_eq!(decision.action.to_string(), "HOLD");
    }
}
