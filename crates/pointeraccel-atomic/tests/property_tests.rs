//! Property tests for counters and the mailbox.

use pointeraccel_atomic::{EngineCounters, Mailbox};
use quickcheck_macros::quickcheck;

#[quickcheck]
fn prop_sample_count_matches_increments(n: u8) -> bool {
    let counters = EngineCounters::new();
    for _ in 0..n {
        counters.inc_sample();
    }
    counters.snapshot().samples == u64::from(n)
}

#[quickcheck]
fn prop_mailbox_never_exceeds_capacity(cap: u8, posts: u8) -> bool {
    let mailbox = Mailbox::with_capacity(usize::from(cap));
    let mut accepted = 0usize;
    for i in 0..posts {
        if mailbox.post(i).is_ok() {
            accepted += 1;
        }
    }
    accepted == usize::from(posts).min(mailbox.capacity()) && mailbox.len() == accepted
}

#[quickcheck]
fn prop_drain_preserves_order(values: Vec<u16>) -> bool {
    let mailbox = Mailbox::with_capacity(values.len());
    for &v in &values {
        if mailbox.post(v).is_err() {
            return false;
        }
    }
    let mut out = Vec::with_capacity(values.len());
    mailbox.drain(|v| out.push(v));
    out == values
}
