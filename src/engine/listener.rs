//! Host notification interface.
//!
//! The engine reports exactly two things: the running energy total changed,
//! and the puzzle was solved. Everything else a host needs (the current
//! path, per-edge use counts, remaining visits) it reads back through the
//! engine's accessors after the call that mutated state returns.

/// Callbacks delivered synchronously from inside `attempt_move`, `undo`,
/// and `reset`, on the calling thread, after the mutation has completed.
///
/// When one call fires both, `on_energy_changed` always precedes
/// `on_solved`. Both methods default to doing nothing so a host can
/// implement just the one it cares about.
pub trait EngineListener {
    /// The cumulative energy value changed to `energy`.
    fn on_energy_changed(&mut self, energy: i32) {
        let _ = energy;
    }

    /// The final required visit was just made. Fired exactly once per
    /// solve; the engine stays terminal until `reset`.
    fn on_solved(&mut self) {}
}
