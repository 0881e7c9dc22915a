//! Turn order policies.

use std::cmp::Reverse;

use crate::state::{Combatant, Side};

/// Produces the turn order of an encounter as participant slots.
///
/// The returned list must be a permutation of `0..participants.len()`;
/// session initialization rejects anything else.
pub trait TurnOrderPolicy {
    fn order(&self, participants: &[Combatant]) -> Vec<usize>;
}

impl<F> TurnOrderPolicy for F
where
    F: Fn(&[Combatant]) -> Vec<usize>,
{
    fn order(&self, participants: &[Combatant]) -> Vec<usize> {
        self(participants)
    }
}

/// Allies in supplied order, then enemies in supplied order.
#[derive(Clone, Copy, Debug, Default)]
pub struct InsertionOrder;

impl TurnOrderPolicy for InsertionOrder {
    fn order(&self, participants: &[Combatant]) -> Vec<usize> {
        let slots_of = |side: Side| {
            participants
                .iter()
                .enumerate()
                .filter(move |(_, c)| c.side == side)
                .map(|(slot, _)| slot)
        };
        slots_of(Side::Ally).chain(slots_of(Side::Enemy)).collect()
    }
}

/// Highest initiative first; ties keep supplied order.
#[derive(Clone, Copy, Debug, Default)]
pub struct InitiativeOrder;

impl TurnOrderPolicy for InitiativeOrder {
    fn order(&self, participants: &[Combatant]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..participants.len()).collect();
        order.sort_by_key(|&slot| Reverse(participants[slot].stats.initiative));
        order
    }
}

pub(crate) fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    order
        .iter()
        .all(|&slot| slot < len && !std::mem::replace(&mut seen[slot], true))
}
