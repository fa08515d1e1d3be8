//! The callback interface entity behaviours implement, and the context hosts pass to it.

use orbiter_core::{EntityHost, EntityId, MissingResourceError};

use crate::DiagnosticSink;

/// Host collaborators handed to a behaviour for the duration of one callback.
pub struct ScriptContext<'a> {
    /// Entity store the behaviour may mutate.
    pub entities: &'a mut dyn EntityHost,
    /// Sink for structured diagnostic events.
    pub diagnostics: &'a mut dyn DiagnosticSink,
}

impl<'a> ScriptContext<'a> {
    /// Bundle the collaborators for one callback.
    pub fn new(entities: &'a mut dyn EntityHost, diagnostics: &'a mut dyn DiagnosticSink) -> Self {
        Self { entities, diagnostics }
    }
}

/// Callback shape every entity behaviour conforms to.
///
/// The host calls [`bind`](Self::bind) before anything else, then
/// [`initialize`](Self::initialize) and [`post_initialize`](Self::post_initialize)
/// once, then [`update`](Self::update) and [`post_update`](Self::post_update)
/// once per tick. [`swap`](Self::swap) is triggered from outside the tick loop.
pub trait EntityScript {
    /// Attach the behaviour to `entity`. Replaces any earlier binding.
    fn bind(&mut self, entity: EntityId);

    /// Entity the behaviour is bound to, if any.
    fn entity(&self) -> Option<EntityId>;

    /// One-time setup after binding.
    fn initialize(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), MissingResourceError>;

    /// Runs after every behaviour in the host has initialized.
    fn post_initialize(&mut self, ctx: &mut ScriptContext<'_>);

    /// Per-tick step. `dt` is the host's elapsed time in seconds.
    fn update(&mut self, ctx: &mut ScriptContext<'_>, dt: f32) -> Result<(), MissingResourceError>;

    /// Runs after every behaviour in the host has updated this tick.
    fn post_update(&mut self, ctx: &mut ScriptContext<'_>);

    /// External trigger, independent of the tick loop.
    fn swap(&mut self) -> Result<(), MissingResourceError>;
}
