use crate::env::CombatEnv;
use crate::event::CombatEvent;
use crate::state::{CombatState, CombatantId};

use super::{ActionError, ActionResult, ActionTransition, actor_of};

/// Withdraws the actor's side from the encounter.
///
/// Always succeeds on the actor's own turn. Target and resource checks do
/// not apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FleeAction {
    pub actor: CombatantId,
}

impl FleeAction {
    pub fn new(actor: CombatantId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for FleeAction {
    type Result = ActionResult;

    fn apply(
        &self,
        state: &mut CombatState,
        _env: &CombatEnv<'_>,
    ) -> Result<ActionResult, ActionError> {
        let side = actor_of(state, self.actor)?.side;
        state.record(CombatEvent::Fled {
            actor: self.actor,
            side,
        });
        Ok(ActionResult::Fled { side })
    }
}
