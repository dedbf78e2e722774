use super::error::{StateError, StateResult};
use super::{event::StateTransition, AppEvent, AppState};

#[derive(Debug)]
pub struct StateMachine {
    state: AppState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn can_transition(&self, event: AppEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: AppEvent) -> Option<AppState> {
        use AppEvent::*;
        match (self.state, event) {
            (AppState::Landing, EnterRequested) => Some(AppState::Opening),
            (AppState::Landing, SkipLanding) => Some(AppState::Board),
            (AppState::Opening, CurtainOpened) => Some(AppState::Board),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: AppEvent) -> StateResult<AppState> {
        tracing::debug!(from = ?self.state, event = ?event, "request state transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid state transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(Some(self.state), event, next);
        self.state = next;
        self.transition_history.push(record);

        Ok(self.state)
    }
}

#[cfg(test)]
impl StateMachine {
    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AppState::{:?}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_transition_tracks_valid_and_invalid_events() {
        let mut machine = StateMachine::new();
        assert!(machine.can_transition(AppEvent::EnterRequested));
        assert!(machine.can_transition(AppEvent::SkipLanding));
        assert!(!machine.can_transition(AppEvent::CurtainOpened));

        let _ = machine
            .transition(AppEvent::EnterRequested)
            .expect("landing -> opening should transition");

        assert!(machine.can_transition(AppEvent::CurtainOpened));
        assert!(!machine.can_transition(AppEvent::EnterRequested));
    }

    #[test]
    fn transition_records_history_with_ordered_entries() {
        let mut machine = StateMachine::new();
        let _ = machine
            .transition(AppEvent::EnterRequested)
            .expect("enter should work");
        let _ = machine
            .transition(AppEvent::CurtainOpened)
            .expect("curtain should open");

        assert_eq!(machine.state(), AppState::Board);
        assert_eq!(machine.history().len(), 2);
        assert_eq!(
            machine.history()[0],
            StateTransition::new(
                Some(AppState::Landing),
                AppEvent::EnterRequested,
                AppState::Opening
            )
        );
        assert_eq!(
            machine.history()[1],
            StateTransition::new(
                Some(AppState::Opening),
                AppEvent::CurtainOpened,
                AppState::Board
            )
        );
    }

    #[test]
    fn skip_landing_goes_straight_to_board() {
        let mut machine = StateMachine::new();
        assert_eq!(
            machine.transition(AppEvent::SkipLanding).unwrap(),
            AppState::Board
        );
        assert_eq!(machine.to_string(), "AppState::Board");
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_history() {
        let mut machine = StateMachine::new();

        let err = machine
            .transition(AppEvent::CurtainOpened)
            .expect_err("landing -> curtain opened should fail");
        assert!(matches!(
            err,
            StateError::InvalidStateTransition {
                from: AppState::Landing,
                event: AppEvent::CurtainOpened
            }
        ));
        assert_eq!(machine.state(), AppState::Landing);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn second_enter_request_during_curtain_is_rejected() {
        let mut machine = StateMachine::new();
        let _ = machine.transition(AppEvent::EnterRequested).unwrap();
        assert!(machine.transition(AppEvent::EnterRequested).is_err());
        assert_eq!(machine.state(), AppState::Opening);
    }
}
