//! Capture on one thread while other threads query.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;

#[test]
fn readers_never_see_torn_state() {
    let index: SharedIndex = SharedIndex::new();
    let capture = CaptureAdapter::new(index.clone(), CapturePolicy::assign_only());
    capture.on_assign(Some("Anchor"), Some(form(BASE, 0x000001)));

    let done = Arc::new(AtomicBool::new(false));
    let barrier = Arc::new(Barrier::new(5));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = index.clone();
            let done = Arc::clone(&done);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut last_size = 0;
                while !done.load(Ordering::Acquire) {
                    assert_eq!(index.lookup("anchor"), form(BASE, 0x000001));
                    let size = index.size();
                    assert!(size >= last_size, "size went backwards");
                    last_size = size;
                }
            })
        })
        .collect();

    barrier.wait();
    for slot in 0..5_000u32 {
        capture.on_assign(Some(format!("Record{}", slot).as_str()), Some(form(DLC, slot + 2)));
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(index.size(), 5_001);
}

#[test]
fn clients_on_many_threads() {
    let h = Harness::new();
    h.load(&[("Shared", form(PATCH, 0x000042))]);
    h.finish_loading();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let responder = Arc::clone(&h.responder);
            thread::spawn(move || {
                let client = responder.connect(&format!("Worker{}", i));
                assert!(client.request_ready());
                client.lookup("shared")
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), form(PATCH, 0x000042));
    }
    assert_eq!(h.responder.readiness().listener_count(), 9);
}
