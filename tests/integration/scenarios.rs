//! Load order scenarios resolved through a connected client.

use crate::common::*;

#[test]
fn iron_dagger_overridden_by_later_source() {
    let h = Harness::new();
    h.load(&[
        ("IronDagger", form(BASE, 0x012345)),
        ("IronDagger", form(DLC, 0x012345)),
    ]);
    h.finish_loading();

    assert_eq!(h.client.lookup("irondagger"), FormId(0x01012345));
    assert_eq!(h.client.lookup("IRONDAGGER"), FormId(0x01012345));
    assert_eq!(
        h.client.reverse_lookup(FormId(0x00012345)).as_deref(),
        Some("irondagger")
    );
    assert_eq!(
        h.client.reverse_lookup(FormId(0x01012345)).as_deref(),
        Some("irondagger")
    );
    assert_eq!(h.responder.index().size(), 2);
}

#[test]
fn capture_order_does_not_decide_the_winner() {
    let h = Harness::new();
    h.load(&[
        ("WeapSteelSword", form(PATCH, 0x000800)),
        ("WeapSteelSword", form(BASE, 0x013989)),
        ("WeapSteelSword", form(DLC, 0x000801)),
    ]);
    h.finish_loading();
    assert_eq!(h.client.lookup("weapsteelsword"), form(PATCH, 0x000800));
}

#[test]
fn distinct_ids_resolve_independently() {
    let h = Harness::new();
    h.load(&[
        ("WeapIronDagger", form(BASE, 0x01397E)),
        ("ArmorIronCuirass", form(BASE, 0x012E49)),
        ("ArmorIronCuirass", form(PATCH, 0x000D62)),
    ]);
    h.finish_loading();

    assert_eq!(h.client.lookup("WeapIronDagger"), form(BASE, 0x01397E));
    assert_eq!(h.client.lookup("ArmorIronCuirass"), form(PATCH, 0x000D62));
    assert_eq!(h.client.lookup("ArmorIronHelmet"), FormId::NULL);
    assert_eq!(h.responder.index().stats().conflicts, 1);
}

#[test]
fn empty_index_answers_sentinels() {
    let h = Harness::new();
    h.finish_loading();

    assert!(h.client.is_ready());
    assert_eq!(h.client.lookup("Anything"), FormId::NULL);
    assert_eq!(h.client.lookup(""), FormId::NULL);
    assert_eq!(h.client.reverse_lookup(FormId(0x00000014)), None);
    assert_eq!(h.client.reverse_lookup(FormId::NULL), None);
    assert_eq!(h.responder.index().size(), 0);
}

#[test]
fn absent_inputs_are_not_captured() {
    let h = Harness::new();
    h.capture.on_assign(None, Some(form(BASE, 1)));
    h.capture.on_assign(Some("Orphan"), None);
    h.capture.on_assign(Some(""), Some(form(BASE, 2)));
    h.finish_loading();

    assert_eq!(h.responder.index().size(), 0);
    assert_eq!(h.client.lookup("Orphan"), FormId::NULL);
    assert_eq!(h.capture.stats().assigns, 3);
}

#[test]
fn recaptured_form_points_at_latest_editor_id() {
    let h = Harness::new();
    h.load(&[
        ("OldName", form(BASE, 0x000100)),
        ("NewName", form(BASE, 0x000100)),
    ]);
    h.finish_loading();

    assert_eq!(
        h.client.reverse_lookup(form(BASE, 0x000100)).as_deref(),
        Some("newname")
    );
    // The forward entry for the old name is kept
    assert_eq!(h.client.lookup("OldName"), form(BASE, 0x000100));
    assert_eq!(h.responder.index().size(), 1);
}

#[test]
fn non_ascii_bytes_are_not_folded() {
    let h = Harness::new();
    h.load(&[("ÄpfelKorb", form(BASE, 0x000200))]);
    h.finish_loading();

    assert_eq!(h.client.lookup("Äpfelkorb"), form(BASE, 0x000200));
    assert_eq!(h.client.lookup("äpfelkorb"), FormId::NULL);
}

#[test]
fn chained_setter_still_runs() {
    let h = Harness::new();
    let mut stored = None;
    h.capture.on_assign_chained(Some("CellName"), Some(form(BASE, 0x00003C)), |id| {
        stored = id.map(str::to_string);
    });
    h.finish_loading();

    assert_eq!(stored.as_deref(), Some("CellName"));
    assert_eq!(h.client.lookup("cellname"), form(BASE, 0x00003C));
}
