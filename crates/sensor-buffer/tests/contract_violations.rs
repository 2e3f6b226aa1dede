//! Contract-violation paths (`insert` after `close`, `ack` without a prior
//! `next_unread`) call `std::process::abort`. That can't be asserted in the
//! same process as the test harness, so each case re-executes this binary
//! in a child process selecting only that one test, via the
//! `SENSOR_BUFFER_SUBPROCESS` marker, and checks that the child died
//! abnormally rather than exiting cleanly.

use sensor_buffer::{Buffer, DATA_CONSUMER};
use std::process::Command;

const MARKER: &str = "SENSOR_BUFFER_SUBPROCESS";

#[test]
fn insert_after_close_aborts_process() {
    run_in_subprocess_and_expect_abort("insert_after_close_aborts_process");
}

#[test]
fn ack_without_next_unread_aborts_process() {
    run_in_subprocess_and_expect_abort("ack_without_next_unread_aborts_process");
}

fn run_in_subprocess_and_expect_abort(case: &str) {
    if std::env::var(MARKER).is_ok() {
        // We are the child: run the offending operation directly.
        match case {
            "insert_after_close_aborts_process" => {
                let buffer = Buffer::new();
                buffer.close();
                buffer.insert(sensor_buffer::Record::new(1, 0.0, 0));
                unreachable!("insert after close must abort before returning");
            }
            "ack_without_next_unread_aborts_process" => {
                let buffer = Buffer::new();
                buffer.ack(DATA_CONSUMER);
                unreachable!("ack without next_unread must abort before returning");
            }
            other => panic!("unknown case: {other}"),
        }
    }

    let exe = std::env::current_exe().expect("current test binary path");
    let status = Command::new(exe)
        .arg("--test-threads=1")
        .arg("--exact")
        .arg(case)
        .env(MARKER, "1")
        .status()
        .expect("spawn child test process");

    assert!(
        !status.success(),
        "contract violation in `{case}` should have aborted the child process"
    );
}
