use crate::event::EventError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Rejected event input or list filter. Never has side effects.
    #[error(transparent)]
    Event(#[from] EventError),
}
