//! Control engine integration tests
//!
//! Drives the public API frame by frame and checks what reaches the pointer.

use gesture_pointer::control::{ClickDebouncer, ControllerSettings, GestureController};
use gesture_pointer::gesture::{
    FingerState, HandFrame, Landmark, Mode, Point, INDEX_TIP, MIDDLE_TIP,
};
use gesture_pointer::session::run_session;
use gesture_pointer::sink::{PointerAction, RecordingSink};
use gesture_pointer::source::{Observation, ReplaySource};

const MOVE: [bool; 5] = [false, true, false, false, false];
const CLICK: [bool; 5] = [false, true, true, false, false];

fn move_hand(x: f64, y: f64) -> HandFrame {
    HandFrame::from_landmarks([Landmark::new(INDEX_TIP, x, y)], FingerState::new(MOVE))
}

fn pinch_hand(distance: f64) -> HandFrame {
    HandFrame::from_landmarks(
        [
            Landmark::new(INDEX_TIP, 250.0, 200.0),
            Landmark::new(MIDDLE_TIP, 250.0, 200.0 + distance),
        ],
        FingerState::new(CLICK),
    )
}

fn controller() -> GestureController {
    // Region (100,100)-(540,380), screen 1920x1080, factor 7
    GestureController::new(ControllerSettings::default()).unwrap()
}

#[test]
fn test_hand_held_at_region_centre() {
    let mut controller = controller();
    let mut sink = RecordingSink::new();

    for _ in 0..10 {
        controller
            .process_frame(Some(&move_hand(320.0, 240.0)), &mut sink)
            .unwrap();
    }

    let moves = sink.moves();
    assert_eq!(moves.len(), 10);
    assert!(moves.iter().all(|p| *p == Point::new(960.0, 540.0)));
    assert_eq!(sink.click_count(), 0);
}

#[test]
fn test_point_then_pinch_clicks_once() {
    let mut controller = controller();
    let mut sink = RecordingSink::new();

    for _ in 0..3 {
        controller
            .process_frame(Some(&move_hand(320.0, 240.0)), &mut sink)
            .unwrap();
    }

    let mut click_frames = Vec::new();
    for (i, distance) in [60.0, 50.0, 45.0, 35.0].into_iter().enumerate() {
        let outcome = controller
            .process_frame(Some(&pinch_hand(distance)), &mut sink)
            .unwrap();
        assert_eq!(outcome.mode, Mode::Click);
        if outcome.click.is_some() {
            click_frames.push(i);
        }
    }

    assert_eq!(click_frames, vec![3]);
    assert_eq!(sink.click_count(), 1);
    assert_eq!(sink.actions().last(), Some(&PointerAction::Click));
    assert_eq!(sink.moves().len(), 3);
}

#[test]
fn test_held_pinch_across_move_frames_does_not_reclick() {
    let mut controller = controller();
    let mut sink = RecordingSink::new();

    controller.process_frame(Some(&pinch_hand(20.0)), &mut sink).unwrap();
    // A move frame in between leaves the click state alone
    controller
        .process_frame(Some(&move_hand(300.0, 200.0)), &mut sink)
        .unwrap();
    controller.process_frame(None, &mut sink).unwrap();
    controller.process_frame(Some(&pinch_hand(20.0)), &mut sink).unwrap();

    assert_eq!(sink.click_count(), 1);

    controller.process_frame(Some(&pinch_hand(60.0)), &mut sink).unwrap();
    controller.process_frame(Some(&pinch_hand(20.0)), &mut sink).unwrap();
    assert_eq!(sink.click_count(), 2);
}

#[test]
fn test_smoothing_converges_on_steady_target() {
    let mut controller = controller();
    let mut sink = RecordingSink::new();

    controller.process_frame(Some(&move_hand(100.0, 100.0)), &mut sink).unwrap();
    for _ in 0..50 {
        controller.process_frame(Some(&move_hand(540.0, 380.0)), &mut sink).unwrap();
    }

    // Unmirrored target is (1920,1080); mirrored output approaches (0,1080)
    let moves = sink.moves();
    let distances: Vec<f64> = moves[1..]
        .iter()
        .map(|p| p.distance_to(&Point::new(0.0, 1080.0)))
        .collect();
    assert!(distances.windows(2).all(|w| w[1] < w[0]));
    assert!(distances[distances.len() - 1] < 5.0);
}

#[test]
fn test_unmirrored_corners() {
    let settings = ControllerSettings {
        mirror_x: false,
        ..ControllerSettings::default()
    };
    let mut controller = GestureController::new(settings).unwrap();
    let mut sink = RecordingSink::new();

    controller.process_frame(Some(&move_hand(540.0, 380.0)), &mut sink).unwrap();
    assert_eq!(sink.moves(), vec![Point::new(1920.0, 1080.0)]);

    controller.reset();
    controller.process_frame(Some(&move_hand(100.0, 100.0)), &mut sink).unwrap();
    assert_eq!(sink.moves()[1], Point::new(0.0, 0.0));
}

#[test]
fn test_debouncer_sequences() {
    let fired = |samples: &[f64]| -> Vec<usize> {
        let mut debouncer = ClickDebouncer::new(40.0).unwrap();
        samples
            .iter()
            .enumerate()
            .filter_map(|(i, d)| debouncer.evaluate(*d).map(|_| i))
            .collect()
    };

    assert_eq!(fired(&[50.0, 50.0, 30.0, 30.0, 50.0]), vec![2]);
    assert_eq!(fired(&[50.0, 45.0, 41.0, 40.0]), Vec::<usize>::new());
    assert_eq!(fired(&[30.0, 30.0, 30.0]), vec![0]);
}

#[test]
fn test_session_over_replayed_frames() {
    let mut frames: Vec<Observation> = Vec::new();
    frames.push(Observation::NoHand);
    frames.extend((0..5).map(|_| Observation::Hand(move_hand(320.0, 240.0))));
    frames.extend([60.0, 35.0, 30.0].map(|d| Observation::Hand(pinch_hand(d))));
    frames.push(Observation::Hand(HandFrame::from_landmarks(
        [Landmark::new(INDEX_TIP, 320.0, 240.0)],
        FingerState::new([true, true, true, true, true]),
    )));

    let mut source = ReplaySource::new(frames);
    let mut sink = RecordingSink::new();
    let mut controller = controller();

    let stats = run_session(&mut source, &mut sink, &mut controller).unwrap();

    assert_eq!(stats.frames, 10);
    assert_eq!(stats.hand_frames, 9);
    assert_eq!(stats.idle_frames, 2);
    assert_eq!(stats.move_frames, 5);
    assert_eq!(stats.click_frames, 3);
    assert_eq!(stats.moves, 5);
    assert_eq!(stats.clicks, 1);
    assert_eq!(sink.click_count(), 1);
}
