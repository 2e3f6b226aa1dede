use crate::invariants::{
    debug_assert_chain_reaches_tail, debug_assert_counter_coherence, debug_assert_cursors_reachable,
    debug_assert_fully_acked,
};
use crate::record::Record;
use std::sync::{Condvar, Mutex, MutexGuard};

/// Fixed number of independent consumers the buffer serves.
///
/// The distilled design calls for exactly two roles (data manager, storage
/// manager) established once at startup; dynamic consumer registration is a
/// non-goal. Generalizing to `K` consumers only requires widening this
/// constant and the `remaining_acks` counter already accounts for it (see
/// [`Slot`]).
pub const CONSUMER_COUNT: usize = 2;

/// Consumer index for the data manager's aggregation pipeline.
pub const DATA_CONSUMER: usize = 0;

/// Consumer index for the storage manager's persistence pipeline.
pub const STORAGE_CONSUMER: usize = 1;

/// Stable arena index identifying a live node. Indices are reused once a
/// node is reclaimed, which keeps reclamation O(1) without extra frees.
type NodeId = u32;

struct Slot {
    record: Record,
    /// Link toward the node that became head immediately after this one,
    /// i.e. the next record in insertion order. `None` on the current head.
    newer: Option<NodeId>,
    /// Number of consumers that have not yet acked this node. Reaches zero
    /// only once every consumer has observed it, at which point it is
    /// reclaimed.
    remaining_acks: u8,
}

/// Point-in-time snapshot of the buffer's observability counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Total records inserted.
    pub added: u64,
    /// Total records acknowledged by the data-manager consumer.
    pub calculated: u64,
    /// Total records acknowledged by the storage-manager consumer.
    pub stored: u64,
}

struct ChainState {
    slots: Vec<Option<Slot>>,
    free_list: Vec<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    cursors: [Option<NodeId>; CONSUMER_COUNT],
    closed: bool,
    added: u64,
    per_consumer: [u64; CONSUMER_COUNT],
}

impl ChainState {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            head: None,
            tail: None,
            cursors: [None; CONSUMER_COUNT],
            closed: false,
            added: 0,
            per_consumer: [0; CONSUMER_COUNT],
        }
    }

    fn slot(&self, id: NodeId) -> &Slot {
        self.slots[id as usize]
            .as_ref()
            .expect("cursor or link referenced a reclaimed slot")
    }

    fn alloc(&mut self, record: Record) -> NodeId {
        let slot = Slot {
            record,
            newer: None,
            remaining_acks: CONSUMER_COUNT as u8,
        };
        if let Some(id) = self.free_list.pop() {
            self.slots[id as usize] = Some(slot);
            id
        } else {
            let id = self.slots.len() as NodeId;
            self.slots.push(Some(slot));
            id
        }
    }

    #[cfg(debug_assertions)]
    fn tail_reachable_from_head(&self) -> bool {
        let Some(mut cur) = self.head else {
            return self.tail.is_none();
        };
        // Head-to-tail isn't directly linked (links run tail-to-head), so
        // instead verify the forward chain starting at `tail` terminates at
        // `head` and that `head`'s own link is absent.
        let Some(start) = self.tail else {
            return false;
        };
        cur = start;
        let mut steps = 0usize;
        loop {
            match self.slots[cur as usize].as_ref() {
                Some(slot) => match slot.newer {
                    Some(next) => {
                        cur = next;
                        steps += 1;
                        if steps > self.slots.len() + 1 {
                            return false;
                        }
                    }
                    None => return Some(cur) == self.head,
                },
                None => return false,
            }
        }
    }

    #[cfg(debug_assertions)]
    fn cursors_reachable_from_head(&self) -> bool {
        self.cursors.iter().all(|c| match c {
            None => true,
            Some(id) => (*id as usize) < self.slots.len() && self.slots[*id as usize].is_some(),
        })
    }

    fn reclaim_tail(&mut self, id: NodeId) {
        debug_assert_eq!(Some(id), self.tail, "reclaiming a node that is not the tail");
        let slot = self.slots[id as usize].take().expect("double free of a slot");
        debug_assert_fully_acked!(slot.remaining_acks);
        self.tail = slot.newer;
        if self.tail.is_none() {
            self.head = None;
        }
        self.free_list.push(id);
    }
}

/// The shared-buffer multi-reader handoff engine.
///
/// A single producer inserts records at the head; [`CONSUMER_COUNT`]
/// independent consumers each drain the buffer at their own pace via
/// [`Buffer::next_unread`] / [`Buffer::ack`]. A record is freed only once
/// every consumer has acknowledged it.
pub struct Buffer {
    state: Mutex<ChainState>,
    condvar: Condvar,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Creates a new, empty, open buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ChainState::new()),
            condvar: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap_or_else(|_| {
            eprintln!(
                "sensor-buffer: mutex poisoned (a thread panicked while holding the buffer lock); aborting"
            );
            std::process::abort();
        })
    }

    /// Appends `record` as the newest node. Wakes any consumer whose cursor
    /// was caught up to the previous head.
    ///
    /// # Panics
    ///
    /// Aborts the process if called after [`Buffer::close`] — inserting
    /// into a closed buffer is a programmer contract violation, not a
    /// recoverable error.
    pub fn insert(&self, record: Record) {
        let mut state = self.lock();
        if state.closed {
            eprintln!("sensor-buffer: insert called after close; aborting");
            std::process::abort();
        }

        let id = state.alloc(record);
        if let Some(old_head) = state.head {
            state
                .slots
                .get_mut(old_head as usize)
                .and_then(Option::as_mut)
                .expect("head slot missing")
                .newer = Some(id);
        } else {
            state.tail = Some(id);
        }
        state.head = Some(id);

        let mut woke_anyone = false;
        for cursor in &mut state.cursors {
            if cursor.is_none() {
                *cursor = Some(id);
                woke_anyone = true;
            }
        }
        state.added += 1;

        debug_assert_chain_reaches_tail!(state);
        debug_assert_cursors_reachable!(state);

        drop(state);
        if woke_anyone {
            self.condvar.notify_all();
        }
    }

    /// Blocks until a record is available for `consumer_index` or the
    /// buffer is closed and drained. Returns `None` exactly once the
    /// consumer has observed every record inserted before `close` returned.
    #[must_use]
    pub fn next_unread(&self, consumer_index: usize) -> Option<Record> {
        let mut state = self.lock();
        while state.cursors[consumer_index].is_none() && !state.closed {
            state = self.condvar.wait(state).unwrap_or_else(|_| {
                eprintln!("sensor-buffer: condvar wait poisoned; aborting");
                std::process::abort();
            });
        }

        let id = state.cursors[consumer_index]?;
        // Record is Copy and tiny; returning an owned value sidesteps
        // holding the lock (or an unsafe borrow) across the caller's
        // processing step.
        Some(state.slot(id).record)
    }

    /// Acknowledges the record most recently returned to `consumer_index`
    /// by [`Buffer::next_unread`]. Must be called exactly once per
    /// successful `next_unread`.
    ///
    /// # Panics
    ///
    /// Aborts the process if called without a matching `next_unread`.
    pub fn ack(&self, consumer_index: usize) {
        let mut state = self.lock();
        let Some(id) = state.cursors[consumer_index] else {
            eprintln!("sensor-buffer: ack called without a prior next_unread; aborting");
            std::process::abort();
        };

        let advance_to = state.slot(id).newer;
        state.cursors[consumer_index] = advance_to;
        state.per_consumer[consumer_index] += 1;

        debug_assert_counter_coherence!(state.added, state.per_consumer[consumer_index]);

        let remaining = {
            let slot = state.slots[id as usize].as_mut().expect("acked slot missing");
            slot.remaining_acks -= 1;
            slot.remaining_acks
        };
        if remaining == 0 {
            state.reclaim_tail(id);
        }
    }

    /// Marks the buffer closed: no further inserts are permitted, and every
    /// consumer blocked in `next_unread` wakes to observe the terminal
    /// state once its backlog drains. Idempotent.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        drop(state);
        self.condvar.notify_all();
    }

    /// Returns `true` once [`Buffer::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Returns `true` if the buffer currently holds no live records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().tail.is_none()
    }

    /// Snapshot of the `added`/`calculated`/`stored` counters. Not
    /// linearizable with concurrent inserts; intended for progress and
    /// test inspection.
    #[must_use]
    pub fn counters(&self) -> Counters {
        let state = self.lock();
        Counters {
            added: state.added,
            calculated: state.per_consumer[DATA_CONSUMER],
            stored: state.per_consumer[STORAGE_CONSUMER],
        }
    }
}

// Buffer is Send + Sync automatically: ChainState holds no raw pointers,
// only arena-indexed slots, so there is nothing to assert unsafely here.
