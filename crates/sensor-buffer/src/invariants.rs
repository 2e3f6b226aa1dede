//! Debug assertion macros for the shared buffer's chain and cursor invariants.
//!
//! These are only active in debug builds (`#[cfg(debug_assertions)]`), so
//! there is zero overhead in release builds. Used exclusively by `Buffer`.

// =============================================================================
// INV-BUF-01: Tail reachability
// =============================================================================

/// Assert that the chain from `head` reaches `tail` and that `tail` has no
/// older neighbor.
///
/// Used in: `Buffer::insert`, `Buffer::ack` after mutating the chain.
macro_rules! debug_assert_chain_reaches_tail {
    ($state:expr) => {
        debug_assert!(
            $state.tail_reachable_from_head(),
            "INV-BUF-01 violated: tail is not reachable from head"
        )
    };
}

// =============================================================================
// INV-BUF-02: Cursor reachability
// =============================================================================

/// Assert that every present cursor names a live slot.
///
/// Used in: `Buffer::insert`, `Buffer::ack`.
macro_rules! debug_assert_cursors_reachable {
    ($state:expr) => {
        debug_assert!(
            $state.cursors_reachable_from_head(),
            "INV-BUF-02 violated: a cursor points at a node not reachable from head"
        )
    };
}

// =============================================================================
// INV-BUF-03: No reclamation ahead of schedule
// =============================================================================

/// Assert that a node is reclaimed only once every consumer has acked it.
///
/// Used in: `Buffer::ack` right before a slot is freed.
macro_rules! debug_assert_fully_acked {
    ($remaining:expr) => {
        debug_assert!(
            $remaining == 0,
            "INV-BUF-03 violated: reclaiming a node with {} pending acks",
            $remaining
        )
    };
}

// =============================================================================
// INV-BUF-05: Counter coherence
// =============================================================================

/// Assert that `added` never falls behind a per-consumer counter.
///
/// Used in: `Buffer::ack` after incrementing a per-consumer counter.
macro_rules! debug_assert_counter_coherence {
    ($added:expr, $consumer_count:expr) => {
        debug_assert!(
            $consumer_count <= $added,
            "INV-BUF-05 violated: consumer counter {} exceeds added {}",
            $consumer_count,
            $added
        )
    };
}

pub(crate) use debug_assert_chain_reaches_tail;
pub(crate) use debug_assert_counter_coherence;
pub(crate) use debug_assert_cursors_reachable;
pub(crate) use debug_assert_fully_acked;
