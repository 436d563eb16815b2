//! Start/stop state machine for manager-like components.
//!
//! A [`Lifecycle`] owns the state of one supervised component and drives it
//! through `Stopped → Starting → Running → Stopping → Stopped`, with
//! `Faulted` reachable when a startup hook fails. The owning component
//! never mutates state directly; it requests transitions and supplies the
//! setup/teardown hooks that run inside them.
//!
//! Shutdown is deliberately asymmetric: a failing setup hook faults the
//! component, but a failing teardown hook cannot prevent it from reaching
//! `Stopped`. A component that cannot stop is worse than one that stopped
//! uncleanly.
//!
//! # Examples
//!
//! ```
//! use hangar_core::{Lifecycle, Outcome, State, StopKind};
//!
//! let mut lifecycle = Lifecycle::new();
//! assert_eq!(lifecycle.state(), State::Stopped);
//!
//! let started = lifecycle.start_with(|| Outcome::success(()));
//! assert_eq!(started.value(), Some(&State::Running));
//!
//! let stopped = lifecycle.stop_with(StopKind::Graceful, || Outcome::success(()));
//! assert_eq!(stopped.value(), Some(&State::Stopped));
//! ```

use crate::outcome::Outcome;
use chrono::{DateTime, Utc};
use std::fmt;

/// Operational state of a supervised component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Not running; the initial and the restartable terminal state.
    Stopped,
    /// Start requested; the setup hook is executing.
    Starting,
    /// Fully operational.
    Running,
    /// Stop requested; the teardown hook is executing.
    Stopping,
    /// Startup failed; requires an explicit [`Lifecycle::reset`].
    Faulted,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Faulted => "faulted",
        };
        write!(f, "{name}")
    }
}

/// How a stop request treats the teardown hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopKind {
    /// Run the teardown hook; report (but do not obey) its failure.
    Graceful,
    /// Skip the teardown hook entirely.
    Abort,
}

/// Read access to a component's lifecycle state.
///
/// Implemented by [`Lifecycle`] itself and by components that delegate to
/// an owned lifecycle, giving hosts one vocabulary for "is this thing
/// usable right now".
pub trait Stateful {
    /// Returns the current state.
    fn state(&self) -> State;

    /// Returns `true` when the current state is one of `states`.
    fn is_in_state(&self, states: &[State]) -> bool {
        states.contains(&self.state())
    }
}

/// One recorded state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State before the change.
    pub from: State,
    /// State after the change.
    pub to: State,
    /// When the change happened.
    pub at: DateTime<Utc>,
}

/// The start/stop state machine.
///
/// States: `Stopped` (initial) → `Starting` → `Running` → `Stopping` →
/// `Stopped`, restartable; `Faulted` is entered when the setup hook fails
/// and left only through [`Lifecycle::reset`].
#[derive(Debug)]
pub struct Lifecycle {
    state: State,
    previous: Option<Transition>,
}

impl Lifecycle {
    /// Creates a lifecycle in the `Stopped` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Stopped,
            previous: None,
        }
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns the most recent transition, if any has happened.
    #[inline]
    #[must_use]
    pub const fn previous(&self) -> Option<&Transition> {
        self.previous.as_ref()
    }

    /// Returns `true` when guarded operations may proceed.
    ///
    /// Operations are permitted while `Starting` (so startup hooks can use
    /// the component they are warming up) and while `Running`.
    #[inline]
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        matches!(self.state, State::Starting | State::Running)
    }

    /// Guard for operations that require a usable component.
    ///
    /// Returns `Success` when the state is `Starting` or `Running` and a
    /// `Failure` naming the current state otherwise. Callers propagate the
    /// failure without touching any resource.
    pub fn ensure_operational(&self) -> Outcome<()> {
        if self.is_operational() {
            Outcome::success(())
        } else {
            Outcome::failure(format!(
                "operation refused; component is {} (requires starting or running)",
                self.state
            ))
        }
    }

    /// Starts the component, running `setup` between `Starting` and
    /// `Running`.
    ///
    /// From `Stopped`: transitions to `Starting`, runs the hook, then to
    /// `Running` (hook `Success`/`Warning`, warnings carried through) or to
    /// `Faulted` (hook `Failure`, returned as the start failure). Starting
    /// an already `Starting`/`Running` component is a `Warning` no-op.
    /// Starting from `Stopping` or `Faulted` is a `Failure`.
    pub fn start_with<F>(&mut self, setup: F) -> Outcome<State>
    where
        F: FnOnce() -> Outcome<()>,
    {
        match self.state {
            State::Starting | State::Running => Outcome::warning(
                self.state,
                format!("start ignored; component is already {}", self.state),
            ),
            State::Stopping => {
                Outcome::failure("cannot start while the component is stopping")
            }
            State::Faulted => {
                Outcome::failure("cannot start a faulted component; reset it first")
            }
            State::Stopped => {
                self.transition(State::Starting);
                let setup_outcome = setup();
                if setup_outcome.is_failure() {
                    self.transition(State::Faulted);
                    let mut result = setup_outcome.retype::<State>();
                    result.add_message("startup failed; component is now faulted");
                    return result;
                }
                self.transition(State::Running);
                let mut result = Outcome::success(State::Running);
                result.absorb(&setup_outcome);
                result
            }
        }
    }

    /// Stops the component, running `teardown` between `Stopping` and
    /// `Stopped` unless the stop is an [`StopKind::Abort`].
    ///
    /// Only effective from `Running`; once entered, `Stopped` is always
    /// reached. A failing teardown hook demotes the result to `Warning`;
    /// it never blocks the stop. Stopping a component in any other state
    /// is a `Warning` no-op.
    pub fn stop_with<F>(&mut self, kind: StopKind, teardown: F) -> Outcome<State>
    where
        F: FnOnce() -> Outcome<()>,
    {
        match self.state {
            State::Running => {
                self.transition(State::Stopping);
                let result = match kind {
                    StopKind::Abort => {
                        tracing::debug!("teardown hook skipped (abort stop)");
                        Outcome::success(State::Stopped)
                    }
                    StopKind::Graceful => {
                        let teardown_outcome = teardown();
                        if teardown_outcome.is_failure() {
                            tracing::warn!(
                                messages = ?teardown_outcome.messages(),
                                "teardown hook failed; stopping anyway"
                            );
                            let mut result = Outcome::warning(
                                State::Stopped,
                                "teardown hook failed; component stopped anyway",
                            );
                            for message in teardown_outcome.messages() {
                                result.add_message(message.clone());
                            }
                            result
                        } else {
                            let mut result = Outcome::success(State::Stopped);
                            result.absorb(&teardown_outcome);
                            result
                        }
                    }
                };
                self.transition(State::Stopped);
                result
            }
            State::Stopped | State::Stopping | State::Starting => Outcome::warning(
                self.state,
                format!("stop ignored; component is {}", self.state),
            ),
            State::Faulted => Outcome::warning(
                State::Faulted,
                "stop ignored; component is faulted (reset to recover)",
            ),
        }
    }

    /// Clears a fault, returning the component to `Stopped`.
    ///
    /// Only valid from `Faulted`; any other state is a `Failure`.
    pub fn reset(&mut self) -> Outcome<State> {
        if self.state == State::Faulted {
            self.transition(State::Stopped);
            Outcome::success(State::Stopped)
        } else {
            Outcome::failure(format!(
                "reset is only valid from the faulted state (current: {})",
                self.state
            ))
        }
    }

    fn transition(&mut self, to: State) {
        let from = self.state;
        tracing::info!(%from, %to, "lifecycle transition");
        self.previous = Some(Transition {
            from,
            to,
            at: Utc::now(),
        });
        self.state = to;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Stateful for Lifecycle {
    fn state(&self) -> State {
        self.state
    }
}
