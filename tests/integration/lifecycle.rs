//! Queries before and after the readiness broadcast.

use std::sync::Arc;

use crate::common::*;

#[test]
fn client_refuses_until_ready() {
    let h = Harness::new();
    h.load(&[("WeapIronDagger", form(BASE, 0x01397E))]);

    assert!(!h.client.is_ready());
    assert_eq!(h.client.lookup("WeapIronDagger"), FormId::NULL);
    assert_eq!(h.client.reverse_lookup(form(BASE, 0x01397E)), None);

    assert!(h.finish_loading());
    assert_eq!(h.client.lookup("WeapIronDagger"), form(BASE, 0x01397E));
}

#[test]
fn responder_answers_direct_commands_before_ready() {
    let h = Harness::new();
    h.load(&[("WeapIronDagger", form(BASE, 0x01397E))]);

    let output = h.responder.execute(edidmap::Command::query("weapirondagger"));
    assert_eq!(output, edidmap::Output::FormId(form(BASE, 0x01397E)));
}

#[test]
fn readiness_broadcast_happens_once() {
    let h = Harness::new();
    assert!(h.finish_loading());
    assert!(!h.finish_loading());
    assert!(!h.responder.on_host_event(HostEvent::Other(7)));
}

#[test]
fn late_client_requests_replay() {
    let h = Harness::new();
    h.load(&[("WeapIronDagger", form(BASE, 0x01397E))]);
    h.finish_loading();

    let late = h.responder.connect("LateModule");
    assert!(!late.is_ready());
    assert!(late.request_ready());
    assert_eq!(late.lookup("weapirondagger"), form(BASE, 0x01397E));
}

#[test]
fn capture_after_ready_is_visible() {
    let h = Harness::new();
    h.finish_loading();
    h.load(&[("SpawnedLater", form(PATCH, 0x000001))]);
    assert_eq!(h.client.lookup("SpawnedLater"), form(PATCH, 0x000001));
}

#[test]
fn reverse_result_outlives_later_captures() {
    let h = Harness::new();
    h.load(&[("Stable", form(BASE, 0x000010))]);
    h.finish_loading();

    let key = h.client.reverse_lookup(form(BASE, 0x000010)).unwrap();
    for i in 0..1000u32 {
        h.capture
            .on_assign(Some(format!("Filler{}", i).as_str()), Some(form(DLC, i)));
    }
    assert_eq!(&*key, "stable");

    let again = h.client.reverse_lookup(form(BASE, 0x000010)).unwrap();
    assert!(Arc::ptr_eq(&key, &again));
}
