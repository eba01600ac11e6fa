use eframe::egui::pos2;
use key_mon::drag::DragTracker;
use key_mon::gui::record_window_position;
use key_mon::settings::Settings;

#[test]
fn drag_scenario_persists_final_position() {
    // Press at (100,100) window-local with the window at (50,50); motion to
    // (130,115) lands the window at (80,65), and that position survives the
    // settings round trip through disk.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut settings = Settings::default();
    let mut drag = DragTracker::new();

    assert!(drag.press(pos2(100.0, 100.0)));
    let moved = drag.motion(pos2(130.0, 115.0), pos2(50.0, 50.0)).unwrap();
    record_window_position(&mut settings, moved);
    assert!(drag.release());

    // Motion after release moves nothing and records nothing.
    assert_eq!(drag.motion(pos2(300.0, 300.0), moved), None);
    assert_eq!((settings.x_pos, settings.y_pos), (80, 65));

    settings.save(&path).unwrap();
    let reloaded = Settings::load(&path).unwrap();
    assert_eq!((reloaded.x_pos, reloaded.y_pos), (80, 65));
}

#[test]
fn recorded_position_rounds_to_integers() {
    let mut settings = Settings::default();
    record_window_position(&mut settings, pos2(79.6, 64.4));
    assert_eq!((settings.x_pos, settings.y_pos), (80, 64));
}
