//! NDJSON landmark stream integration tests
//!
//! Writes detector output to a temporary file and replays it through a
//! full session.

use std::io::Write;

use gesture_pointer::control::{ControllerSettings, GestureController};
use gesture_pointer::gesture::Point;
use gesture_pointer::session::run_session;
use gesture_pointer::sink::RecordingSink;
use gesture_pointer::source::{open_source, LatestFrameStage};

fn write_stream(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_replay_file_through_session() {
    let file = write_stream(&[
        r#"{"hand":null}"#,
        r#"{"landmarks":[{"id":8,"x":320,"y":240}],"fingers":[0,1,0,0,0]}"#,
        r#"{"landmarks":[[8,320,240]],"fingers":[false,true,false,false,false]}"#,
        "",
        r#"{"landmarks":[{"id":8,"x":300,"y":200},{"id":12,"x":300,"y":260}],"fingers":[0,1,1,0,0]}"#,
        r#"{"landmarks":[{"id":8,"x":300,"y":200},{"id":12,"x":300,"y":230}],"fingers":[0,1,1,0,0]}"#,
        "null",
    ]);

    let mut source = open_source(file.path().to_str().unwrap()).unwrap();
    let mut sink = RecordingSink::new();
    let mut controller = GestureController::new(ControllerSettings::default()).unwrap();

    let stats = run_session(&mut source, &mut sink, &mut controller).unwrap();

    assert_eq!(stats.frames, 7);
    assert_eq!(stats.hand_frames, 4);
    assert_eq!(stats.moves, 2);
    assert_eq!(stats.clicks, 1);
    assert_eq!(
        sink.moves(),
        vec![Point::new(960.0, 540.0), Point::new(960.0, 540.0)]
    );
}

#[test]
fn test_stray_output_lines_do_not_end_session() {
    let file = write_stream(&[
        r#"{"landmarks":[{"id":8,"x":320,"y":240}],"fingers":[0,1,0,0,0]}"#,
        "W0000 00:00:1700000000.000000 inference_feedback_manager.cc:114] warning",
        r#"{"landmarks": [oops"#,
        r#"{"landmarks":[{"id":8,"x":320,"y":240}],"fingers":[0,1,0,0,0]}"#,
    ]);

    let mut source = open_source(file.path().to_str().unwrap()).unwrap();
    let mut sink = RecordingSink::new();
    let mut controller = GestureController::new(ControllerSettings::default()).unwrap();

    let stats = run_session(&mut source, &mut sink, &mut controller).unwrap();

    assert_eq!(stats.frames, 4);
    assert_eq!(stats.skipped_frames, 2);
    assert_eq!(stats.moves, 2);
    assert_eq!(
        sink.moves(),
        vec![Point::new(960.0, 540.0), Point::new(960.0, 540.0)]
    );
}

#[test]
fn test_frame_missing_index_tip_is_skipped() {
    let file = write_stream(&[
        r#"{"landmarks":[{"id":4,"x":320,"y":240}],"fingers":[0,1,0,0,0]}"#,
        r#"{"landmarks":[{"id":8,"x":320,"y":240}],"fingers":[0,1,0,0,0]}"#,
    ]);

    let mut source = open_source(file.path().to_str().unwrap()).unwrap();
    let mut sink = RecordingSink::new();
    let mut controller = GestureController::new(ControllerSettings::default()).unwrap();

    let stats = run_session(&mut source, &mut sink, &mut controller).unwrap();
    assert_eq!(stats.skipped_frames, 1);
    assert_eq!(stats.moves, 1);
    // Skipped frame did not seed the smoother
    assert_eq!(sink.moves(), vec![Point::new(960.0, 540.0)]);
}

#[test]
fn test_latest_frame_stage_over_file() {
    let lines: Vec<String> = (0..20)
        .map(|i| {
            format!(
                r#"{{"landmarks":[{{"id":8,"x":{},"y":240}}],"fingers":[0,1,0,0,0]}}"#,
                200 + i
            )
        })
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let file = write_stream(&refs);

    let source = open_source(file.path().to_str().unwrap()).unwrap();
    let mut stage = LatestFrameStage::spawn(source).unwrap();
    let mut sink = RecordingSink::new();
    let mut controller = GestureController::new(ControllerSettings::default()).unwrap();

    let stats = run_session(&mut stage, &mut sink, &mut controller).unwrap();

    assert_eq!(stats.frames + stage.dropped_frames(), 20);
    assert_eq!(stats.dropped_frames, stage.dropped_frames());
    assert!(stats.frames >= 1);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.ndjson");
    assert!(open_source(path.to_str().unwrap()).is_err());
}
