use super::event::AppEvent;
use super::model::AppState;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

/// Screen transition rejected by the machine; the current screen stays as it was.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("{event:?} is not accepted on the {from:?} screen")]
    InvalidStateTransition { from: AppState, event: AppEvent },
}
