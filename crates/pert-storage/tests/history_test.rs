//! Tests for the multiplier history log.

use std::io::Write;

use pert_core::types::CalibrationMultiplier;
use pert_storage::{AdjustmentEntry, MultiplierHistory};

fn m(v: f64) -> CalibrationMultiplier {
    CalibrationMultiplier::new(v).unwrap()
}

#[test]
fn missing_history_has_no_latest_multiplier() {
    let dir = tempfile::tempdir().unwrap();
    let history = MultiplierHistory::new(dir.path().join("multiplier-history.txt"));
    assert_eq!(history.latest_multiplier().unwrap(), None);
    assert!(history.read_all().unwrap().entries.is_empty());
}

#[test]
fn appended_entries_read_back_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let history = MultiplierHistory::new(dir.path().join(".calibration/multiplier-history.txt"));

    history
        .append(&AdjustmentEntry::new(m(2.0), m(2.4), 20.0))
        .unwrap();
    history
        .append(&AdjustmentEntry::new(m(2.4), m(2.3), -3.0))
        .unwrap();

    let log = history.read_all().unwrap();
    assert!(log.malformed.is_empty());
    assert_eq!(log.entries.len(), 2);
    assert_eq!(log.entries[0].applied, m(2.4));
    assert_eq!(log.entries[1].calibration_error, -3.0);
    assert_eq!(history.latest_multiplier().unwrap(), Some(m(2.3)));
}

#[test]
fn file_is_human_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multiplier-history.txt");
    let history = MultiplierHistory::new(&path);
    history
        .append(&AdjustmentEntry::new(m(2.0), m(2.4), 20.0))
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.ends_with(": 2.00 → 2.40 (calibration error: +20.0%)\n"));
}

#[test]
fn hand_edited_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multiplier-history.txt");
    let history = MultiplierHistory::new(&path);
    history
        .append(&AdjustmentEntry::new(m(2.0), m(2.2), 8.0))
        .unwrap();
    {
        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "reset by hand, see ticket").unwrap();
    }
    history
        .append(&AdjustmentEntry::new(m(2.2), m(2.1), -4.0))
        .unwrap();

    let log = history.read_all().unwrap();
    assert_eq!(log.entries.len(), 2);
    assert_eq!(log.malformed.len(), 1);
    assert_eq!(log.malformed[0].line, 2);
    assert_eq!(history.latest_multiplier().unwrap(), Some(m(2.1)));
}
