//! JSON export round-trip for position analysis

use std::fs::File;

use misere4::cli::analyze::{AnalysisReport, build_report, write_report};
use misere4::game::{BoardState, Player};
use misere4::search::WIN;

#[test]
fn report_roundtrips_through_a_json_file() {
    // Two empties: 3 completes X's top row, 14 is safe and wins
    let state = BoardState::from_string("XXX.OXXOOXOOXO.O").unwrap();
    let report = build_report(&state).unwrap();

    assert_eq!(report.to_move, Player::X);
    assert_eq!(report.value, Some(WIN));
    assert_eq!(report.engine_move, Some(14));
    assert_eq!(report.moves.len(), 2);
    assert!(report.moves.iter().any(|m| m.position == 3 && m.completes_line));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.json");

    write_report(&path, &report).unwrap();
    let restored: AnalysisReport = serde_json::from_reader(File::open(&path).unwrap()).unwrap();

    assert_eq!(restored, report);
}

#[test]
fn decided_positions_export_without_a_value() {
    let state = BoardState::from_label("XXXXOOO........._O").unwrap();
    let report = build_report(&state).unwrap();

    assert_eq!(report.value, None);
    assert_eq!(report.engine_move, None);
    assert!(report.moves.is_empty());

    let json = serde_json::to_string(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["label"], state.encode());
    assert!(value["value"].is_null());
}
