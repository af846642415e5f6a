//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `guard`, `toast`) so individual
//! components can depend on small focused models. The session operations are
//! pure over an injected store and are wrapped in signals only at the edge.

pub mod guard;
pub mod session;
pub mod toast;
