#![warn(missing_docs)]
//! Entity behaviours and the host that drives their lifecycle.
//!
//! A behaviour implements [`EntityScript`]. The [`ScriptHost`] binds it to an
//! entity, calls `initialize`/`post_initialize` once, then `update`/`post_update`
//! every tick. Entity mutation and diagnostics reach the behaviour through the
//! per-call [`ScriptContext`]; navigation is injected when the behaviour is
//! built.

mod diagnostics;
mod host;
mod navigation;
mod script;
mod updater;

pub use diagnostics::{DiagnosticBus, DiagnosticEvent, DiagnosticSink};
pub use host::{ScriptFault, ScriptHost, ScriptPhase, ScriptSlot, TickReport};
pub use navigation::{NavigationLatch, Navigator};
pub use script::{EntityScript, ScriptContext};
pub use updater::{OrientationUpdater, SWAP_TARGET};
