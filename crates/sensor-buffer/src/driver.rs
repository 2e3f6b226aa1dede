//! Generic consumer driver: pull the next unread record, hand it to a
//! callback, acknowledge it.

use crate::buffer::Buffer;
use crate::record::Record;

/// Runs the consumer loop for `consumer_index` until the buffer is closed
/// and drained of every record destined for that consumer.
///
/// `on_start` acquires per-consumer resources (a database handle, a loaded
/// sensor map) and returns a context value threaded through to `process`
/// and, at the end, consumed by `on_stop`. `ack` fires immediately after
/// each `process` call — including when `process` panics, since a leaked
/// ack stalls reclamation for every consumer, not just this one.
pub fn run_consumer<Ctx>(
    buffer: &Buffer,
    consumer_index: usize,
    on_start: impl FnOnce() -> Ctx,
    mut process: impl FnMut(&mut Ctx, Record),
    on_stop: impl FnOnce(Ctx),
) {
    let mut ctx = on_start();
    while let Some(record) = buffer.next_unread(consumer_index) {
        let _ack_on_drop = AckOnDrop {
            buffer,
            consumer_index,
        };
        process(&mut ctx, record);
    }
    on_stop(ctx);
}

/// Calls `Buffer::ack` on drop, so the record is acknowledged on every exit
/// path out of the loop body above — normal return or unwind.
struct AckOnDrop<'a> {
    buffer: &'a Buffer,
    consumer_index: usize,
}

impl Drop for AckOnDrop<'_> {
    fn drop(&mut self) {
        self.buffer.ack(self.consumer_index);
    }
}
