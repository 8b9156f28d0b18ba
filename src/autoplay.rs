use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::events::CarouselEvent;

/// Identifies one scheduled repeating timer. Ids are never reused by a
/// scheduler, so a tick can always be matched to the timer that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Source of repeating autoplay ticks.
pub trait Scheduler {
    /// Start a timer that fires every `period`, first firing one full period
    /// from now.
    fn schedule_repeating(&mut self, period: Duration) -> TimerId;
    /// Stop a timer. Unknown or already cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Spawns one tokio task per timer; each task posts [`CarouselEvent::Tick`]
/// into the carousel's event queue.
pub struct TokioScheduler {
    events: Sender<CarouselEvent>,
    shutdown: CancellationToken,
    timers: HashMap<TimerId, CancellationToken>,
    next_id: u64,
}

impl TokioScheduler {
    /// `shutdown` is the parent token; cancelling it stops every timer.
    pub fn new(events: Sender<CarouselEvent>, shutdown: CancellationToken) -> Self {
        Self {
            events,
            shutdown,
            timers: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn active(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let cancel = self.shutdown.child_token();
        self.timers.insert(id, cancel.clone());

        let events = self.events.clone();
        let first = Instant::now() + period;
        tokio::spawn(async move {
            let mut ticker = interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        trace!(%id, "autoplay tick");
                        if events.send(CarouselEvent::Tick(id)).await.is_err() {
                            debug!(%id, "carousel event queue closed; stopping timer");
                            break;
                        }
                    }
                }
            }
        });
        debug!(%id, period_ms = period.as_millis() as u64, "autoplay timer scheduled");
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(token) = self.timers.remove(&id) {
            token.cancel();
            debug!(%id, "autoplay timer cancelled");
        }
    }
}

/// Deterministic scheduler for tests: records what the carousel asked for
/// and never fires on its own.
pub mod testkit {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use super::{Scheduler, TimerId};

    #[derive(Debug, Default)]
    pub struct ManualScheduler {
        next_id: u64,
        active: BTreeSet<TimerId>,
        starts: usize,
        cancels: usize,
        last_period: Option<Duration>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn active_timers(&self) -> usize {
            self.active.len()
        }

        pub fn active_ids(&self) -> Vec<TimerId> {
            self.active.iter().copied().collect()
        }

        pub fn starts(&self) -> usize {
            self.starts
        }

        pub fn cancels(&self) -> usize {
            self.cancels
        }

        pub fn last_period(&self) -> Option<Duration> {
            self.last_period
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule_repeating(&mut self, period: Duration) -> TimerId {
            self.next_id += 1;
            let id = TimerId(self.next_id);
            self.active.insert(id);
            self.starts += 1;
            self.last_period = Some(period);
            id
        }

        fn cancel(&mut self, id: TimerId) {
            if self.active.remove(&id) {
                self.cancels += 1;
            }
        }
    }
}
