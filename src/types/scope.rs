use serde::{Deserialize, Serialize};

use crate::types::state::StateId;

/// Which states a question or resource applies to.
///
/// On the wire this stays the nullable `stateId` number: `null` means the
/// record applies to every state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "Option<StateId>", into = "Option<StateId>")]
pub enum Scope {
    #[default]
    Global,
    State(StateId),
}

impl Scope {
    /// Global records apply everywhere, scoped ones only to their own state.
    pub fn applies_to(&self, state_id: &StateId) -> bool {
        match self {
            Scope::Global => true,
            Scope::State(id) => id == state_id,
        }
    }
}

impl From<Option<StateId>> for Scope {
    fn from(id: Option<StateId>) -> Self {
        match id {
            Some(id) => Scope::State(id),
            None => Scope::Global,
        }
    }
}

impl From<Scope> for Option<StateId> {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Global => None,
            Scope::State(id) => Some(id),
        }
    }
}
