use super::{Round, Side};

/// Turn bookkeeping for an encounter.
///
/// `order` is a permutation over indices into `CombatState::participants`;
/// `index` points into `order`. Whenever a living combatant exists, `index`
/// addresses a living entry.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub order: Vec<usize>,
    pub index: usize,
    pub round: Round,
    /// Side of the combatant currently taking its turn.
    pub acting_side: Side,
}

impl TurnState {
    pub fn new(order: Vec<usize>, index: usize, acting_side: Side) -> Self {
        Self {
            order,
            index,
            round: Round::FIRST,
            acting_side,
        }
    }

    /// Participant slot of the current actor.
    pub fn current_slot(&self) -> Option<usize> {
        self.order.get(self.index).copied()
    }
}
