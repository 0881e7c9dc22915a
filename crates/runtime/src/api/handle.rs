//! Cloneable façade for submitting actions to a running session.
//!
//! [`SessionHandle`] is the single input adapter for UI events, timers and
//! providers. Exactly one request may be in flight: a request that arrives
//! while another is resolving (for example from an event subscriber or the
//! termination callback) is refused with [`RuntimeError::Busy`].
use std::cell::RefCell;
use std::rc::Rc;

use combat_core::{CombatReport, CombatSession, CombatantId, Outcome, Resolution};

use super::errors::{Result, RuntimeError};
use super::providers::ActionChoice;

/// Client-facing handle to interact with a session.
#[derive(Clone)]
pub struct SessionHandle {
    session: Rc<RefCell<CombatSession>>,
}

impl SessionHandle {
    pub fn new(session: CombatSession) -> Self {
        Self {
            session: Rc::new(RefCell::new(session)),
        }
    }

    /// Submits an action for `actor`.
    pub fn submit(&self, actor: CombatantId, choice: ActionChoice) -> Result<Resolution> {
        let mut session = self
            .session
            .try_borrow_mut()
            .map_err(|_| RuntimeError::Busy)?;
        Ok(session.execute(actor, choice.kind, choice.target)?)
    }

    /// Withdraws `actor`'s side from the encounter.
    pub fn flee(&self, actor: CombatantId) -> Result<Resolution> {
        self.submit(actor, ActionChoice::flee())
    }

    /// Ends the encounter on behalf of its owner.
    pub fn terminate(&self, outcome: Outcome) -> Result<()> {
        let mut session = self
            .session
            .try_borrow_mut()
            .map_err(|_| RuntimeError::Busy)?;
        Ok(session.terminate(outcome)?)
    }

    /// Runs `f` against a read-only view of the session.
    pub fn read<R>(&self, f: impl FnOnce(&CombatSession) -> R) -> Result<R> {
        let session = self.session.try_borrow().map_err(|_| RuntimeError::Busy)?;
        Ok(f(&session))
    }

    pub fn current_actor(&self) -> Result<Option<CombatantId>> {
        self.read(CombatSession::current_actor)
    }

    pub fn is_active(&self) -> Result<bool> {
        self.read(CombatSession::is_active)
    }

    pub fn report(&self) -> Result<Option<CombatReport>> {
        self.read(CombatSession::report)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.session.try_borrow() {
            Ok(session) => f.debug_tuple("SessionHandle").field(&*session).finish(),
            Err(_) => f.write_str("SessionHandle(<busy>)"),
        }
    }
}
