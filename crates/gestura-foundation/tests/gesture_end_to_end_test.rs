//! End-to-end tests driving recognizers through the touch source and
//! responder host, from raw pointer samples to recorded callbacks.

use gestura_foundation::prelude::*;
use gestura_testing::robot_assertions::{assert_approx_eq, assert_count};
use gestura_testing::{GestureRecorder, RecordedGesture, TouchRobot};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn swipe_recognizer(
    config: SwipeConfig,
    recorder: &GestureRecorder,
) -> Rc<RefCell<SwipeRecognizer>> {
    Rc::new(RefCell::new(
        SwipeRecognizer::new(config).with_callbacks(recorder.swipe_callbacks()),
    ))
}

fn pan_recognizer(recorder: &GestureRecorder) -> Rc<RefCell<PanRecognizer>> {
    Rc::new(RefCell::new(
        PanRecognizer::new(PanConfig::default()).with_callbacks(recorder.pan_callbacks()),
    ))
}

fn frame(dx: f32, dy: f32, vx: f32, vy: f32) -> TouchEvent {
    TouchEvent::Move(TouchMove::single(GestureSample::new(dx, dy, vx, vy)))
}

fn single_start() -> TouchEvent {
    TouchEvent::Start(TouchStart {
        touch_count: 1,
        origin: Point::new(0.0, 0.0),
    })
}

#[test]
fn continuous_left_swipe_through_host() {
    let recorder = GestureRecorder::new();
    let swipe = swipe_recognizer(
        SwipeConfig::default()
            .horizontal(true)
            .continuous(true)
            .initial_velocity_threshold(0.7)
            .vertical_threshold(10.0),
        &recorder,
    );
    let mut host = GestureResponderHost::new();
    host.register(swipe);

    host.push(single_start());
    host.push(frame(-5.0, 1.0, -0.9, 0.1));
    host.push(frame(-8.0, 2.0, -1.0, 0.1));
    host.push(TouchEvent::Release);
    host.dispatch_pending();

    assert_eq!(
        recorder.events(),
        vec![
            RecordedGesture::SwipeBegin(SwipeState {
                direction: Some(SwipeDirection::Left),
                distance: -5.0,
                velocity: -0.9,
            }),
            RecordedGesture::Swipe(SwipeState {
                direction: Some(SwipeDirection::Left),
                distance: -8.0,
                velocity: -1.0,
            }),
            RecordedGesture::SwipeEnd(SwipeEnd {
                direction: SwipeDirection::Left
            }),
        ]
    );
}

#[test]
fn single_shot_down_swipe_through_host() {
    let recorder = GestureRecorder::new();
    let swipe = swipe_recognizer(
        SwipeConfig::default().up(true).down(true).continuous(false),
        &recorder,
    );
    let mut host = GestureResponderHost::new();
    host.register(swipe);

    host.dispatch(single_start());
    host.dispatch(frame(0.0, 12.0, 0.0, 0.8));
    host.dispatch(frame(0.0, 20.0, 0.0, 1.2));
    host.dispatch(frame(0.0, 25.0, 0.0, 1.4));
    host.dispatch(TouchEvent::Release);

    assert_eq!(
        recorder.events(),
        vec![
            RecordedGesture::SwipeBegin(SwipeState {
                direction: Some(SwipeDirection::Down),
                distance: 12.0,
                velocity: 0.8,
            }),
            RecordedGesture::SwipeEnd(SwipeEnd {
                direction: SwipeDirection::Down
            }),
        ]
    );
}

#[test]
fn robot_flick_left_locks_and_reports_every_frame() {
    let recorder = GestureRecorder::new();
    let swipe = swipe_recognizer(SwipeConfig::default().horizontal(true), &recorder);
    let mut robot = TouchRobot::new();
    robot.register(swipe.clone());

    // 5 frames of -32 px every 16 ms: 2 px/ms.
    robot.flick(300.0, 200.0, 140.0, 200.0, 80);

    let events = recorder.events();
    assert_count(&events, 6, "begin + 4 continues + end");
    assert!(matches!(events[0], RecordedGesture::SwipeBegin(_)));
    assert!(recorder
        .swipe_directions()
        .iter()
        .all(|direction| *direction == SwipeDirection::Left));
    if let RecordedGesture::SwipeBegin(state) = &events[0] {
        assert_approx_eq(state.distance, -32.0, 0.001, "first frame distance");
        assert_approx_eq(state.velocity, -2.0, 0.05, "first frame velocity");
    }
    assert_eq!(swipe.borrow().phase(), SwipePhase::Idle);
}

#[test]
fn slow_drag_never_swipes() {
    let recorder = GestureRecorder::new();
    let swipe = swipe_recognizer(SwipeConfig::default().horizontal(true), &recorder);
    let mut robot = TouchRobot::new();
    robot.register(swipe);

    // 2 px per 16 ms frame, well under 0.7 px/ms.
    robot.drag(100.0, 100.0, 140.0, 100.0, 20);

    assert!(recorder.is_empty());
}

#[test]
fn pan_drags_compose_until_reset() {
    let recorder = GestureRecorder::new();
    let pan = pan_recognizer(&recorder);
    let mut robot = TouchRobot::new();
    robot.register(pan.clone());

    robot.drag(50.0, 50.0, 80.0, 40.0, 3);
    robot.drag(10.0, 10.0, 15.0, 30.0, 4);

    let last = recorder.last_pan().expect("pan events");
    assert_approx_eq(last.absolute_change_x, 35.0, 0.001, "x composes");
    assert_approx_eq(last.absolute_change_y, 10.0, 0.001, "y composes");

    pan.borrow_mut().set_reset_signal(true);
    robot.drag(0.0, 0.0, -6.0, 2.0, 2);

    let last = recorder.last_pan().expect("pan events");
    assert_approx_eq(last.absolute_change_x, -6.0, 0.001, "x after reset");
    assert_approx_eq(last.absolute_change_y, 2.0, 0.001, "y after reset");
}

#[test]
fn pan_absolute_equals_sum_of_changes() {
    let recorder = GestureRecorder::new();
    let pan = pan_recognizer(&recorder);
    let mut robot = TouchRobot::new();
    robot.register(pan);

    robot.press(0, 0.0, 0.0);
    for (x, y) in [(1.5, 0.25), (4.0, -3.0), (2.0, 9.5), (-7.25, 1.0)] {
        robot.move_to(0, x, y);
    }
    robot.release(0);

    let states = recorder.pan_states();
    let sum_x: f32 = states.iter().map(|s| s.change_x).sum();
    let sum_y: f32 = states.iter().map(|s| s.change_y).sum();
    let last = states.last().expect("pan events");
    assert_approx_eq(last.absolute_change_x, sum_x, 1e-4, "x sum");
    assert_approx_eq(last.absolute_change_y, sum_y, 1e-4, "y sum");
    assert_eq!(recorder.events().first(), Some(&RecordedGesture::PanBegin(PanOrigin::default())));
    assert_eq!(recorder.events().last(), Some(&RecordedGesture::PanEnd));
}

#[test]
fn two_finger_start_is_never_claimed() {
    let recorder = GestureRecorder::new();
    let pan = pan_recognizer(&recorder);
    let swipe = swipe_recognizer(SwipeConfig::default().horizontal(true), &recorder);
    let mut robot = TouchRobot::new();
    robot.register(pan);
    robot.register(swipe);

    robot.press_together(&[(0, 100.0, 100.0), (1, 200.0, 100.0)]);
    robot.move_in_steps(0, 100.0, 100.0, 0.0, 100.0, 4);
    robot.release(0);
    robot.release(1);

    assert!(!robot.host().has_responder());
    assert!(recorder.is_empty(), "unexpected events: {:?}", recorder.events());
}

#[test]
fn disabled_recognizers_emit_nothing() {
    let recorder = GestureRecorder::new();
    let pan = pan_recognizer(&recorder);
    let swipe = swipe_recognizer(SwipeConfig::default().horizontal(true), &recorder);
    pan.borrow_mut().set_enabled(false);
    swipe.borrow_mut().set_enabled(false);

    let mut robot = TouchRobot::new();
    robot.register(pan);
    robot.register(swipe);

    robot.flick(300.0, 200.0, 100.0, 200.0, 64);
    robot.drag(0.0, 0.0, 10.0, 10.0, 5);

    assert!(recorder.is_empty());
}

#[test]
fn swipe_takes_gesture_over_from_pan() {
    let recorder = GestureRecorder::new();
    let pan = pan_recognizer(&recorder);
    let swipe = swipe_recognizer(
        SwipeConfig::default().vertical(true).continuous(false),
        &recorder,
    );
    let mut robot = TouchRobot::new();
    robot.register(pan);
    robot.register(swipe);

    robot.press(0, 100.0, 300.0);
    // Slow start: the pan owns the gesture.
    robot.move_to(0, 100.0, 298.0);
    // Fast upward flick: the swipe claims and the pan terminates.
    robot.move_to(0, 100.0, 260.0);
    robot.move_to(0, 100.0, 220.0);
    robot.release(0);

    let events = recorder.events();
    assert_eq!(
        events[0],
        RecordedGesture::PanBegin(PanOrigin {
            origin_x: 100.0,
            origin_y: 300.0
        })
    );
    assert!(matches!(events[1], RecordedGesture::Pan(_)));
    assert_eq!(events[2], RecordedGesture::PanEnd);
    assert!(matches!(
        events[3],
        RecordedGesture::SwipeBegin(SwipeState {
            direction: Some(SwipeDirection::Up),
            ..
        })
    ));
    assert_eq!(
        events[4],
        RecordedGesture::SwipeEnd(SwipeEnd {
            direction: SwipeDirection::Up
        })
    );
    assert_count(&events, 5, "pan handed over to swipe");
}

#[test]
fn platform_cancel_ends_like_release() {
    let recorder = GestureRecorder::new();
    let swipe = swipe_recognizer(SwipeConfig::default().right(true), &recorder);
    let mut robot = TouchRobot::new();
    robot.register(swipe);

    robot.press(0, 0.0, 0.0);
    robot.move_to(0, 30.0, 0.0);
    robot.cancel(0);

    assert_eq!(
        recorder.events().last(),
        Some(&RecordedGesture::SwipeEnd(SwipeEnd {
            direction: SwipeDirection::Right
        }))
    );
}

#[test]
fn each_gesture_locks_its_own_direction() {
    let recorder = GestureRecorder::new();
    let swipe = swipe_recognizer(
        SwipeConfig::default().horizontal(true).vertical(true).continuous(false),
        &recorder,
    );
    let mut robot = TouchRobot::new();
    robot.register(swipe);

    robot.flick(200.0, 200.0, 60.0, 200.0, 48);
    robot.advance_time(500);
    robot.flick(200.0, 200.0, 200.0, 380.0, 48);

    assert_eq!(
        recorder.swipe_directions(),
        vec![
            SwipeDirection::Left,
            SwipeDirection::Left,
            SwipeDirection::Down,
            SwipeDirection::Down,
        ]
    );
}

/// Takes over any gesture on its next move once armed, and keeps it.
struct Interceptor {
    armed: Rc<Cell<bool>>,
    moves: usize,
    released: bool,
}

impl GestureResponder for Interceptor {
    fn should_claim_start(&mut self, _start: &TouchStart) -> bool {
        false
    }

    fn should_claim_move(&mut self, _touch: &TouchMove) -> bool {
        self.armed.get()
    }

    fn termination_requested(&mut self) -> bool {
        false
    }

    fn on_move(&mut self, _touch: &TouchMove) -> Notifications {
        self.moves += 1;
        Notifications::new()
    }

    fn on_release(&mut self) -> Notifications {
        self.released = true;
        Notifications::new()
    }
}

#[test]
fn locked_swipe_ends_once_when_another_responder_takes_over() {
    let recorder = GestureRecorder::new();
    let swipe = swipe_recognizer(SwipeConfig::default().horizontal(true), &recorder);
    let armed = Rc::new(Cell::new(false));
    let interceptor = Rc::new(RefCell::new(Interceptor {
        armed: armed.clone(),
        moves: 0,
        released: false,
    }));
    let mut robot = TouchRobot::new();
    robot.register(swipe.clone());
    robot.register(interceptor.clone());

    robot.press(0, 300.0, 200.0);
    robot.move_to(0, 268.0, 200.0);
    assert_eq!(swipe.borrow().direction(), Some(SwipeDirection::Left));

    armed.set(true);
    robot.move_to(0, 236.0, 200.0);
    robot.move_to(0, 204.0, 200.0);
    robot.release(0);

    let ends = recorder.count(|event| matches!(event, RecordedGesture::SwipeEnd(_)));
    assert_eq!(ends, 1);
    assert_eq!(
        recorder.events().last(),
        Some(&RecordedGesture::SwipeEnd(SwipeEnd {
            direction: SwipeDirection::Left
        }))
    );
    assert_count(&recorder.events(), 2, "begin, then end on takeover");
    assert_eq!(swipe.borrow().phase(), SwipePhase::Idle);
    assert_eq!(interceptor.borrow().moves, 2);
    assert!(interceptor.borrow().released);
    assert!(!robot.host().has_responder());
}

#[test]
fn begin_callback_can_detach_its_own_swipe() {
    let swipe = Rc::new(RefCell::new(SwipeRecognizer::new(
        SwipeConfig::default().horizontal(true),
    )));
    let begins = Rc::new(Cell::new(0));
    let ends = Rc::new(Cell::new(0));
    let handle = Rc::downgrade(&swipe);
    swipe.borrow_mut().set_callbacks(
        SwipeCallbacks::new()
            .on_swipe_begin({
                let begins = begins.clone();
                move |_| {
                    begins.set(begins.get() + 1);
                    if let Some(swipe) = handle.upgrade() {
                        swipe.borrow_mut().set_enabled(false);
                    }
                }
            })
            .on_swipe_end({
                let ends = ends.clone();
                move |_| ends.set(ends.get() + 1)
            }),
    );
    let mut host = GestureResponderHost::new();
    host.register(swipe.clone());

    host.dispatch(single_start());
    host.dispatch(frame(-5.0, 1.0, -0.9, 0.1));
    host.dispatch(frame(-8.0, 2.0, -1.0, 0.1));
    host.dispatch(TouchEvent::Release);

    assert_eq!(begins.get(), 1);
    assert_eq!(ends.get(), 0);
    assert!(!swipe.borrow().is_enabled());
    assert_eq!(swipe.borrow().phase(), SwipePhase::Idle);
}

#[test]
fn end_callback_can_reset_its_own_pan() {
    let recorder = GestureRecorder::new();
    let pan = pan_recognizer(&recorder);
    let handle = Rc::downgrade(&pan);
    pan.borrow_mut().set_callbacks(PanCallbacks::new().on_pan_end(move || {
        if let Some(pan) = handle.upgrade() {
            let mut pan = pan.borrow_mut();
            pan.set_reset_signal(true);
            pan.set_reset_signal(false);
        }
    }));
    let mut robot = TouchRobot::new();
    robot.register(pan.clone());

    robot.drag(0.0, 0.0, 12.0, 6.0, 3);

    assert_eq!(pan.borrow().carried_change(), Offset::ZERO);
    assert_eq!(pan.borrow().absolute_change(), Offset::ZERO);
}

#[test]
fn frame_interval_decides_whether_a_drag_swipes() {
    let recorder = GestureRecorder::new();

    // 8 px per 16 ms frame: 0.5 px/ms, under the threshold.
    let mut slow = TouchRobot::new();
    slow.register(swipe_recognizer(
        SwipeConfig::default().horizontal(true).continuous(false),
        &recorder,
    ));
    slow.drag(0.0, 0.0, 40.0, 0.0, 5);
    assert_eq!(slow.now_ms(), 80);
    assert!(recorder.is_empty());

    // The same path at 8 ms frames: 1 px/ms.
    let mut fast = TouchRobot::new().with_frame_interval(8);
    fast.register(swipe_recognizer(
        SwipeConfig::default().horizontal(true).continuous(false),
        &recorder,
    ));
    fast.drag(0.0, 0.0, 40.0, 0.0, 5);
    assert_eq!(fast.now_ms(), 40);

    let events = recorder.take();
    assert_eq!(recorder.len(), 0);
    assert_count(&events, 2, "single-shot begin and end");
    if let RecordedGesture::SwipeBegin(state) = &events[0] {
        assert_eq!(state.direction, Some(SwipeDirection::Right));
        assert_approx_eq(state.velocity, 1.0, 0.05, "first frame velocity");
    } else {
        panic!("expected a swipe begin, got {:?}", events[0]);
    }
}
