use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use parlor_core::game::DeferredAction;

/// Everything that can fire from the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// 1 Hz heartbeat forwarded to the engine.
    SecondTick,
    /// The automated opponent should pick its move now.
    BotMove,
    /// A delayed transition requested by the engine.
    Engine(DeferredAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    fire_at: Instant,
    /// Insertion order, to keep simultaneous events FIFO.
    seq: u64,
    generation: u64,
    event: TimerEvent,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest due.
        (other.fire_at, other.seq).cmp(&(self.fire_at, self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Timer queue for a single-threaded session runtime.
///
/// Every entry is tagged with the generation of the session that
/// scheduled it. The manager bumps its generation on teardown, so an
/// event surviving past its session is detectable and dropped instead
/// of mutating a successor session.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: Instant, generation: u64, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            fire_at,
            seq,
            generation,
            event,
        });
    }

    /// Pop the earliest event that is due at `now`, if any.
    pub fn pop_due(&mut self, now: Instant) -> Option<(u64, TimerEvent)> {
        if self.queue.peek().is_some_and(|e| e.fire_at <= now) {
            self.queue.pop().map(|e| (e.generation, e.event))
        } else {
            None
        }
    }

    /// When the next event becomes due, if any are queued.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue.peek().map(|e| e.fire_at)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
