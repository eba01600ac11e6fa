use eframe::egui::pos2;
use key_mon::drag::{DragState, DragTracker};

#[test]
fn press_motion_release_scenario() {
    // Press at (100,100) window-local with the window at (50,50); motion to
    // (130,115) must move the window to (80,65), not snap it to the cursor.
    let mut drag = DragTracker::new();
    assert!(drag.press(pos2(100.0, 100.0)));
    assert!(drag.is_dragging());

    let moved = drag.motion(pos2(130.0, 115.0), pos2(50.0, 50.0));
    assert_eq!(moved, Some(pos2(80.0, 65.0)));

    assert!(drag.release());
    assert_eq!(drag.state(), DragState::Idle);

    // Motion after release has no effect.
    assert_eq!(drag.motion(pos2(200.0, 200.0), pos2(80.0, 65.0)), None);
}

#[test]
fn release_without_press_is_a_noop() {
    let mut drag = DragTracker::new();
    assert!(!drag.release());
    assert_eq!(drag.state(), DragState::Idle);
    assert_eq!(drag.motion(pos2(10.0, 10.0), pos2(0.0, 0.0)), None);
}

#[test]
fn window_displacement_equals_sum_of_drag_deltas() {
    // Once the window follows the pointer, the window-local pointer returns
    // to the anchor; each new delta displaces the window again.
    let mut drag = DragTracker::new();
    let anchor = pos2(20.0, 30.0);
    let mut window = pos2(100.0, 200.0);
    drag.press(anchor);

    for (dx, dy) in [(5.0, -3.0), (12.0, 7.0), (-4.0, 0.0)] {
        let pointer = pos2(anchor.x + dx, anchor.y + dy);
        window = drag.motion(pointer, window).unwrap();
    }
    assert_eq!(window, pos2(100.0 + 13.0, 200.0 + 4.0));

    drag.release();
    // Deltas outside a drag do not count.
    assert_eq!(drag.motion(pos2(999.0, 999.0), window), None);
    assert_eq!(window, pos2(113.0, 204.0));
}

#[test]
fn second_press_does_not_move_the_anchor() {
    let mut drag = DragTracker::new();
    assert!(drag.press(pos2(10.0, 10.0)));
    assert!(!drag.press(pos2(90.0, 90.0)));
    assert_eq!(
        drag.motion(pos2(11.0, 12.0), pos2(0.0, 0.0)),
        Some(pos2(1.0, 2.0))
    );
}
