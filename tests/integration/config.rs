//! Configuration file driving the runtime.

use edidmap::CONFIG_FILE_NAME;
use tempfile::tempdir;

use crate::common::*;

#[test]
fn default_file_written_and_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    let config = MapperConfig::load_or_init(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config, MapperConfig::default());

    let h = Harness::with_config(&config);
    assert_eq!(h.responder.name(), edidmap::DEFAULT_PLUGIN_NAME);
}

#[test]
fn read_categories_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "plugin_name = \"Mapper\"\ncapture_on_read = [\"TESObjectREFR\"]\n",
    )
    .unwrap();

    let config = MapperConfig::load_or_init(&path).unwrap();
    let h = Harness::with_config(&config);

    h.capture
        .on_read("TESObjectREFR", Some("PlacedChest"), Some(form(BASE, 0x000500)));
    h.capture
        .on_read("TESNPC", Some("Ignored"), Some(form(BASE, 0x000501)));
    h.finish_loading();

    assert_eq!(h.client.lookup("placedchest"), form(BASE, 0x000500));
    assert_eq!(h.client.lookup("ignored"), FormId::NULL);
    let stats = h.capture.stats();
    assert_eq!((stats.reads, stats.skipped), (1, 1));
    assert_eq!(h.responder.name(), "Mapper");
}

#[test]
fn invalid_level_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "log_level = \"chatty\"\n").unwrap();
    assert!(MapperConfig::load_or_init(&path).is_err());
}
