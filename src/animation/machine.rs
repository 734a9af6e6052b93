use rustc_hash::FxHashMap;
use slotmap::SecondaryMap;

use crate::animation::arrangement::Arrangement;
use crate::animation::state::AnimationState;
use crate::animation::transform::Transform;
use crate::errors::{ArrangeError, Result};
use crate::scene::NodeHandle;
use crate::utils::Time;

/// Resolves a machine's target handles to arrangements.
///
/// Returning `None` means the node is gone; the machine skips it.
pub trait ArrangementTargets {
    fn arrangement_mut(&mut self, node: NodeHandle) -> Option<&mut Arrangement>;
}

impl ArrangementTargets for SecondaryMap<NodeHandle, Arrangement> {
    #[inline]
    fn arrangement_mut(&mut self, node: NodeHandle) -> Option<&mut Arrangement> {
        self.get_mut(node)
    }
}

/// A per-entity finite-state machine driving arrangements.
///
/// Each state lasts `duration` ticks and then hands over to its `next`
/// state, installing that state's transforms on the target arrangements.
/// States form a graph through their `next` names; cycles are normal.
///
/// A machine can only be built from a complete state table: every `next`
/// and the initial state must exist (see [`AnimationMachine::new`]), so
/// ticking never hits an unknown state.
///
/// # Example
///
/// ```rust,ignore
/// let machine = AnimationMachine::builder("init")
///     .state("init", AnimationState::new(60, "falling"))
///     .state(
///         "falling",
///         AnimationState::new(240, "reset")
///             .with_transform(skull, Transform::template(Move::new(0.0, 400.0))),
///     )
///     .state(
///         "reset",
///         AnimationState::new(0, "falling")
///             .with_transform(skull, Transform::template(Move::new(0.0, -400.0))),
///     )
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct AnimationMachine {
    initial: String,
    current: String,
    since: Time,
    started: bool,
    states: FxHashMap<String, AnimationState>,
    /// Last transform this machine installed on each target
    installed: FxHashMap<NodeHandle, Transform>,
}

impl AnimationMachine {
    /// Builds a machine starting in `initial` at time 0.
    ///
    /// Fails if the table is empty, if `initial` is missing, if any state's
    /// `next` is missing, or if any duration is negative.
    pub fn new(initial: impl Into<String>, states: FxHashMap<String, AnimationState>) -> Result<Self> {
        let initial = initial.into();
        validate(&initial, &states)?;
        Ok(Self {
            current: initial.clone(),
            initial,
            since: 0,
            started: false,
            states,
            installed: FxHashMap::default(),
        })
    }

    #[must_use]
    pub fn builder(initial: impl Into<String>) -> AnimationMachineBuilder {
        AnimationMachineBuilder::new(initial)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Name of the current state.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Time the current state was entered.
    #[inline]
    #[must_use]
    pub fn since(&self) -> Time {
        self.since
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<&AnimationState> {
        self.states.get(name)
    }

    #[must_use]
    pub fn current_state(&self) -> Option<&AnimationState> {
        self.states.get(&self.current)
    }

    #[inline]
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Returns to the initial state at `now`. The initial state's transforms
    /// are installed again on the next tick.
    ///
    /// Transforms this machine installed are taken off their targets:
    /// expired ones are committed, running ones are dropped, so a target
    /// stops where its abandoned transform started.
    pub fn reset<T: ArrangementTargets + ?Sized>(&mut self, now: Time, targets: &mut T) {
        for (target, transform) in self.installed.drain() {
            let Some(ar) = targets.arrangement_mut(target) else {
                continue;
            };
            if transform.is_expired(now) {
                ar.retire(&transform, now);
            } else {
                ar.cancel(&transform);
            }
        }
        self.current.clone_from(&self.initial);
        self.since = now;
        self.started = false;
    }

    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Advances the machine to `now`. Returns the number of transitions.
    ///
    /// At most one transition per state is taken in a single call, which
    /// lets a chain of zero-duration states pass through in one tick while
    /// keeping a cycle of zero-duration states from spinning forever.
    pub fn tick<T: ArrangementTargets + ?Sized>(&mut self, now: Time, targets: &mut T) -> usize {
        let limit = self.states.len();
        self.tick_bounded(now, targets, limit)
    }

    /// Like [`AnimationMachine::tick`] with an explicit transition bound.
    pub fn tick_bounded<T: ArrangementTargets + ?Sized>(
        &mut self,
        now: Time,
        targets: &mut T,
        limit: usize,
    ) -> usize {
        if !self.started {
            self.started = true;
            self.activate(self.since, targets);
        }

        let mut advances = 0;
        loop {
            let Some(state) = self.states.get(&self.current) else {
                break;
            };
            if now - self.since < state.duration {
                break;
            }
            if advances >= limit {
                log::warn!(
                    "animation: stopped after {advances} transitions in one tick at '{}'",
                    self.current
                );
                break;
            }

            let next = state.next.clone();
            log::debug!("animation: '{}' -> '{next}' at {now}", self.current);
            self.current = next;
            self.since = now;
            self.activate(now, targets);
            advances += 1;
        }
        advances
    }

    /// Installs the current state's transforms, scheduled from `now`, each
    /// replacing the transform this machine last installed on that target.
    fn activate<T: ArrangementTargets + ?Sized>(&mut self, now: Time, targets: &mut T) {
        let Some(state) = self.states.get(&self.current) else {
            return;
        };
        for (&target, template) in &state.transforms {
            let Some(ar) = targets.arrangement_mut(target) else {
                log::trace!("animation: target {target:?} no longer in scene");
                self.installed.remove(&target);
                continue;
            };
            let transform = state.schedule(template, now);
            let previous = self.installed.insert(target, transform.clone());
            ar.install(transform, previous.as_ref(), now);
        }
    }
}

fn validate(initial: &str, states: &FxHashMap<String, AnimationState>) -> Result<()> {
    if states.is_empty() {
        return Err(ArrangeError::EmptyStateTable);
    }
    if !states.contains_key(initial) {
        return Err(ArrangeError::UnknownInitialState(initial.to_string()));
    }

    // Sorted so the reported error does not depend on hash order.
    let mut names: Vec<&String> = states.keys().collect();
    names.sort();
    for name in names {
        let state = &states[name];
        if state.duration < 0 {
            return Err(ArrangeError::NegativeDuration {
                state: name.clone(),
                duration: state.duration,
            });
        }
        if !states.contains_key(&state.next) {
            return Err(ArrangeError::UnknownNextState {
                state: name.clone(),
                next: state.next.clone(),
            });
        }
    }
    Ok(())
}

/// Collects states for an [`AnimationMachine`]; validation happens in
/// [`AnimationMachineBuilder::build`].
pub struct AnimationMachineBuilder {
    initial: String,
    since: Time,
    states: FxHashMap<String, AnimationState>,
}

impl AnimationMachineBuilder {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            since: 0,
            states: FxHashMap::default(),
        }
    }

    /// Adds a state, replacing any earlier state with the same name.
    #[must_use]
    pub fn state(mut self, name: impl Into<String>, state: AnimationState) -> Self {
        self.states.insert(name.into(), state);
        self
    }

    /// Time at which the initial state is considered entered.
    #[must_use]
    pub fn starting_at(mut self, since: Time) -> Self {
        self.since = since;
        self
    }

    pub fn build(self) -> Result<AnimationMachine> {
        let mut machine = AnimationMachine::new(self.initial, self.states)?;
        machine.since = self.since;
        Ok(machine)
    }
}
