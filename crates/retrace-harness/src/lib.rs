#![forbid(unsafe_code)]

//! Test harness for retrace.
//!
//! - [`MockHost`]: in-memory entity store and focus state that honours the
//!   host notification contract (notify on real change only, one coalesced
//!   notification per application).
//! - [`Session`]: a [`Navigator`](retrace_runtime::Navigator) over a
//!   `MockHost`, delivering the host's notifications after every step the
//!   way an event loop would.
//! - [`ScriptedButtons`]: a [`NavButtonSource`](retrace_core::NavButtonSource)
//!   driven by the test.
//! - [`Op`]: a replayable user/host action, used by property tests and the
//!   fuzz target.

pub mod buttons;
pub mod host;
pub mod ops;
pub mod session;

pub use buttons::ScriptedButtons;
pub use host::{EntityId, MockHost};
pub use ops::Op;
pub use session::Session;
