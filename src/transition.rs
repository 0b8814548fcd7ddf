//! Cinematic transition orchestrator
//!
//! Wraps a theme mutation in a curtain sequence so that no rendered frame
//! ever shows the selection changing while the curtain is see-through:
//!
//! ```text
//! Idle --run_transition--> Engaging --opaque--> Mutating --> Disengaging --clear--> Idle
//! ```
//!
//! The orchestrator is driven by [`TransitionOrchestrator::tick`], called
//! once per frame with the elapsed time. A pending mutation runs exactly
//! once, on the first tick after the curtain reaches full opacity. A failed
//! mutation is logged and the curtain still lifts.

use crate::color::ease_in_out;
use crate::debug;
use crate::store::ThemeStore;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Deferred store mutation executed behind the opaque curtain
pub type Mutation = Box<dyn FnOnce(&mut ThemeStore) -> anyhow::Result<()>>;

/// What to do with a request that arrives while a transition is running
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// Run it after the current one, in arrival order
    #[default]
    Queue,
    /// Drop it
    Ignore,
}

/// Timing and scheduling parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionConfig {
    /// Curtain fade-in time
    pub engage: Duration,
    /// Curtain fade-out time
    pub disengage: Duration,
    pub busy_policy: BusyPolicy,
    /// Upper bound on waiting requests under [`BusyPolicy::Queue`]
    pub max_queue: usize,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            engage: Duration::from_millis(450),
            disengage: Duration::from_millis(450),
            busy_policy: BusyPolicy::Queue,
            max_queue: 8,
        }
    }
}

/// Named states of the curtain sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Engaging,
    Mutating,
    Disengaging,
}

impl TransitionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            TransitionPhase::Idle => "idle",
            TransitionPhase::Engaging => "engaging",
            TransitionPhase::Mutating => "mutating",
            TransitionPhase::Disengaging => "disengaging",
        }
    }
}

impl fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of [`TransitionOrchestrator::run_transition`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The curtain starts engaging on the next tick
    Started { id: u64 },
    /// Waiting behind `position` other requests (0 = next)
    Queued { id: u64, position: usize },
    /// Dropped because the orchestrator was busy
    Ignored,
}

/// Observable milestones, returned from `tick` in the order they happened
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionEvent {
    /// A transition started; curtain at opacity 0
    CurtainEngaged { id: u64 },
    /// Curtain fully covers the frame
    CurtainOpaque { id: u64 },
    /// Mutation ran and succeeded
    Mutated { id: u64 },
    /// Mutation ran and returned an error
    MutationFailed { id: u64, error: String },
    /// Curtain fully lifted; transition finished
    CurtainCleared { id: u64 },
}

struct Request {
    id: u64,
    mutation: Mutation,
}

struct Active {
    id: u64,
    phase: TransitionPhase,
    elapsed: Duration,
    mutation: Option<Mutation>,
}

/// Drives curtain transitions one at a time
pub struct TransitionOrchestrator {
    config: TransitionConfig,
    active: Option<Active>,
    queue: VecDeque<Request>,
    pending_events: Vec<TransitionEvent>,
    next_id: u64,
}

impl TransitionOrchestrator {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            active: None,
            queue: VecDeque::new(),
            pending_events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Request a curtain transition around `mutation`
    ///
    /// Returns immediately; the sequence advances through `tick`.
    pub fn run_transition<F>(&mut self, mutation: F) -> Submission
    where
        F: FnOnce(&mut ThemeStore) -> anyhow::Result<()> + 'static,
    {
        if self.active.is_some() {
            match self.config.busy_policy {
                BusyPolicy::Ignore => {
                    debug::log_category("transition", "busy, request ignored");
                    return Submission::Ignored;
                }
                BusyPolicy::Queue if self.queue.len() >= self.config.max_queue => {
                    debug::log_category("transition", "queue full, request ignored");
                    return Submission::Ignored;
                }
                BusyPolicy::Queue => {
                    let id = self.allocate_id();
                    let position = self.queue.len();
                    self.queue.push_back(Request {
                        id,
                        mutation: Box::new(mutation),
                    });
                    debug::log_transition(id, "new", "queued");
                    return Submission::Queued { id, position };
                }
            }
        }

        let id = self.allocate_id();
        self.start(Request {
            id,
            mutation: Box::new(mutation),
        });
        Submission::Started { id }
    }

    /// Advance the sequence by `dt`
    ///
    /// At most one phase boundary is crossed per tick, so every phase is
    /// visible for at least one rendered frame.
    pub fn tick(&mut self, dt: Duration, store: &mut ThemeStore) -> Vec<TransitionEvent> {
        let mut events = std::mem::take(&mut self.pending_events);

        if self.active.is_none() {
            match self.queue.pop_front() {
                Some(request) => {
                    self.start(request);
                    events.append(&mut self.pending_events);
                }
                None => return events,
            }
        }

        let Some(active) = self.active.as_mut() else {
            return events;
        };

        match active.phase {
            TransitionPhase::Engaging => {
                active.elapsed += dt;
                if active.elapsed >= self.config.engage {
                    debug::log_transition(active.id, "engaging", "mutating");
                    active.phase = TransitionPhase::Mutating;
                    active.elapsed = Duration::ZERO;
                    events.push(TransitionEvent::CurtainOpaque { id: active.id });
                }
            }
            TransitionPhase::Mutating => {
                if let Some(mutation) = active.mutation.take() {
                    match mutation(store) {
                        Ok(()) => events.push(TransitionEvent::Mutated { id: active.id }),
                        Err(e) => {
                            debug::log_category(
                                "transition",
                                &format!("mutation {} failed: {e:#}", active.id),
                            );
                            events.push(TransitionEvent::MutationFailed {
                                id: active.id,
                                error: format!("{e:#}"),
                            });
                        }
                    }
                }
                debug::log_transition(active.id, "mutating", "disengaging");
                active.phase = TransitionPhase::Disengaging;
                active.elapsed = Duration::ZERO;
            }
            TransitionPhase::Disengaging => {
                active.elapsed += dt;
                if active.elapsed >= self.config.disengage {
                    let id = active.id;
                    debug::log_transition(id, "disengaging", "idle");
                    self.active = None;
                    events.push(TransitionEvent::CurtainCleared { id });
                }
            }
            TransitionPhase::Idle => {}
        }

        events
    }

    /// Current phase
    pub fn phase(&self) -> TransitionPhase {
        self.active
            .as_ref()
            .map(|a| a.phase)
            .unwrap_or(TransitionPhase::Idle)
    }

    /// Curtain opacity for the frame about to be drawn, `0.0..=1.0`
    pub fn curtain_opacity(&self) -> f32 {
        let Some(active) = self.active.as_ref() else {
            return 0.0;
        };
        match active.phase {
            TransitionPhase::Idle => 0.0,
            TransitionPhase::Engaging => ease_in_out(progress(active.elapsed, self.config.engage)),
            TransitionPhase::Mutating => 1.0,
            TransitionPhase::Disengaging => {
                1.0 - ease_in_out(progress(active.elapsed, self.config.disengage))
            }
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }

    /// Requests waiting behind the active one
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn start(&mut self, request: Request) {
        debug::log_transition(request.id, "idle", "engaging");
        self.pending_events
            .push(TransitionEvent::CurtainEngaged { id: request.id });
        self.active = Some(Active {
            id: request.id,
            phase: TransitionPhase::Engaging,
            elapsed: Duration::ZERO,
            mutation: Some(request.mutation),
        });
    }
}

impl Default for TransitionOrchestrator {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}

impl fmt::Debug for TransitionOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionOrchestrator")
            .field("phase", &self.phase())
            .field("opacity", &self.curtain_opacity())
            .field("queued", &self.queue.len())
            .finish()
    }
}

/// Fraction of `total` covered by `elapsed`, `1.0` for an empty span
pub(crate) fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

/// Mutation that selects `name` on the store
pub fn select_theme(name: impl Into<String>) -> Mutation {
    let name = name.into();
    Box::new(move |store: &mut ThemeStore| {
        store.select(&name)?;
        Ok(())
    })
}
