//! End-to-end multi-threaded scenarios from the buffer's testable
//! properties: a slow consumer holding back reclamation, interleaved
//! insert/close racing, and divergent consumer pacing.

use proptest::prelude::*;
use sensor_buffer::{Buffer, Record, DATA_CONSUMER, STORAGE_CONSUMER};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn slow_storage_consumer_does_not_lose_records_or_reclaim_early() {
    let buffer = Arc::new(Buffer::new());

    let data_buffer = Arc::clone(&buffer);
    let data_thread = thread::spawn(move || {
        let mut seen = Vec::new();
        while let Some(record) = data_buffer.next_unread(DATA_CONSUMER) {
            seen.push(record.id);
            data_buffer.ack(DATA_CONSUMER);
        }
        seen
    });

    let storage_buffer = Arc::clone(&buffer);
    let storage_thread = thread::spawn(move || {
        let mut seen = Vec::new();
        while let Some(record) = storage_buffer.next_unread(STORAGE_CONSUMER) {
            thread::sleep(Duration::from_millis(5));
            seen.push(record.id);
            storage_buffer.ack(STORAGE_CONSUMER);
        }
        seen
    });

    for id in 0..100u16 {
        buffer.insert(Record::new(id, f64::from(id), 0));
        thread::sleep(Duration::from_micros(100));
    }
    buffer.close();

    let data_seen = data_thread.join().expect("data consumer join");
    let storage_seen = storage_thread.join().expect("storage consumer join");

    assert_eq!(data_seen, (0..100u16).collect::<Vec<_>>());
    assert_eq!(storage_seen, (0..100u16).collect::<Vec<_>>());
    assert!(buffer.is_empty());
    assert_eq!(buffer.counters().added, 100);
}

#[test]
fn reclamation_stalls_while_one_consumer_is_paused_then_catches_up() {
    let buffer = Arc::new(Buffer::new());
    let hold = Arc::new(Mutex::new(()));
    let hold_guard = hold.lock().expect("acquire hold before pausing consumer");

    let paused_buffer = Arc::clone(&buffer);
    let paused_hold = Arc::clone(&hold);
    let storage_thread = thread::spawn(move || {
        let mut seen = 0usize;
        while let Some(_record) = paused_buffer.next_unread(STORAGE_CONSUMER) {
            // Blocks until the main thread releases `hold`.
            let _ = paused_hold.lock().expect("consumer acquire hold");
            paused_buffer.ack(STORAGE_CONSUMER);
            seen += 1;
        }
        seen
    });

    for id in 0..10u16 {
        buffer.insert(Record::new(id, 0.0, 0));
    }

    // Drain the data consumer fully; the storage consumer is blocked on
    // `hold`, so nothing should be reclaimed yet.
    for _ in 0..10 {
        buffer.next_unread(DATA_CONSUMER).expect("record expected");
        buffer.ack(DATA_CONSUMER);
    }
    thread::sleep(Duration::from_millis(20));
    assert!(!buffer.is_empty(), "tail must not advance while storage is paused");

    drop(hold_guard);
    buffer.close();

    let processed = storage_thread.join().expect("storage consumer join");
    assert_eq!(processed, 10);
    assert!(buffer.is_empty());
}

proptest! {
    /// No record inserted before `close` returns is ever lost, and neither
    /// consumer observes a callback after its driver has exited, however
    /// the two consumer threads happen to interleave with the tail end of
    /// the producer's burst and the coordinator's `close` call.
    ///
    /// `close` is only ever called once the producer (the connection
    /// manager's accept loop, per `sensor-net`) has fully returned — insert
    /// and close are never unsynchronized at the buffer boundary, that
    /// ordering is the lifecycle coordinator's job. What genuinely races
    /// here is the two independent consumer threads against the moment
    /// `close` flips the terminal flag.
    #[test]
    fn interleaved_insert_and_close_never_loses_a_record(record_count in 0usize..200) {
        let buffer = Arc::new(Buffer::new());

        let data_buffer = Arc::clone(&buffer);
        let data_thread = thread::spawn(move || {
            let mut seen = Vec::new();
            while let Some(record) = data_buffer.next_unread(DATA_CONSUMER) {
                seen.push(record.id);
                data_buffer.ack(DATA_CONSUMER);
            }
            seen
        });

        let storage_buffer = Arc::clone(&buffer);
        let storage_thread = thread::spawn(move || {
            let mut seen = Vec::new();
            while let Some(record) = storage_buffer.next_unread(STORAGE_CONSUMER) {
                seen.push(record.id);
                storage_buffer.ack(STORAGE_CONSUMER);
            }
            seen
        });

        for id in 0..record_count {
            buffer.insert(Record::new(id as u16, 0.0, 0));
        }
        buffer.close();

        let data_seen = data_thread.join().expect("data consumer join");
        let storage_seen = storage_thread.join().expect("storage consumer join");

        // Every record inserted before `close` returned was observed, in
        // order, by both consumers — regardless of how far each consumer
        // had drained when `close` was called.
        let added = buffer.counters().added as usize;
        prop_assert_eq!(data_seen.len(), added);
        prop_assert_eq!(storage_seen.len(), added);
        prop_assert!(data_seen.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(storage_seen.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(buffer.is_empty());
    }
}
