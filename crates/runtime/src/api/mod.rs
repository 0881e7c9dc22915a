//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the orchestrator can stay focused on the turn loop.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod registry;

pub use errors::{Result, RuntimeError};
pub use handle::SessionHandle;
pub use providers::{ActionChoice, ActionProvider};
pub use registry::ProviderRegistry;
