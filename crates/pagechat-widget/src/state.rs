//! Widget State Machine

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    /// Only the entry affordance is shown
    Hidden,
    /// Shell rendered, waiting for the scrape reply
    Loading,
    /// Input enabled, no request outstanding
    Ready,
    /// A question is in flight and the typing indicator is shown
    AwaitingAnswer,
}

impl WidgetState {
    pub fn can_transition_to(&self, target: WidgetState) -> bool {
        match (self, target) {
            (WidgetState::Hidden, WidgetState::Loading) => true,
            // Popup restore and overlay reuse skip the scrape
            (WidgetState::Hidden, WidgetState::Ready) => true,
            (WidgetState::Loading, WidgetState::Ready) => true,
            (WidgetState::Ready, WidgetState::AwaitingAnswer) => true,
            (WidgetState::AwaitingAnswer, WidgetState::Ready) => true,
            (WidgetState::Loading, WidgetState::Hidden) => true,
            (WidgetState::Ready, WidgetState::Hidden) => true,
            (WidgetState::AwaitingAnswer, WidgetState::Hidden) => true,
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, WidgetState::Hidden)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetState::Hidden => "hidden",
            WidgetState::Loading => "loading",
            WidgetState::Ready => "ready",
            WidgetState::AwaitingAnswer => "awaiting_answer",
        }
    }
}

impl std::fmt::Display for WidgetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(WidgetState::Hidden.can_transition_to(WidgetState::Loading));
        assert!(WidgetState::Loading.can_transition_to(WidgetState::Ready));
        assert!(WidgetState::Ready.can_transition_to(WidgetState::AwaitingAnswer));
        assert!(WidgetState::AwaitingAnswer.can_transition_to(WidgetState::Ready));
        assert!(WidgetState::AwaitingAnswer.can_transition_to(WidgetState::Hidden));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!WidgetState::Hidden.can_transition_to(WidgetState::AwaitingAnswer));
        assert!(!WidgetState::Loading.can_transition_to(WidgetState::AwaitingAnswer));
        assert!(!WidgetState::Hidden.can_transition_to(WidgetState::Hidden));
        assert!(!WidgetState::Ready.can_transition_to(WidgetState::Loading));
    }
}
