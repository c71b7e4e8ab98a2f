use super::*;
use crate::input::PointerEvent;
use crate::layout::{KeyId, Language, builtin};
use std::time::{Duration, Instant};

fn create_test_input_state() -> InputState {
    let mut state = InputState::new(builtin::default_layout(), KeyboardSettings::default());
    state.seed_generator(11);
    state
}

fn center(state: &InputState, id: &str) -> (f64, f64) {
    state
        .layout()
        .key(&KeyId::from(id))
        .unwrap_or_else(|| panic!("no key {id}"))
        .rect
        .center()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Mouse down, up and click over the same key, the desktop sequence.
fn mouse_tap(state: &mut InputState, id: &str, at: Instant) {
    let (x, y) = center(state, id);
    state.on_mouse_down(x, y, at);
    state.on_mouse_up(x, y, at + ms(40));
    state.on_click(&KeyId::from(id), at + ms(41));
}

/// Touch tap followed by the emulated mouse sequence a mobile browser emits.
fn touch_tap(state: &mut InputState, id: &str, at: Instant, hold: Duration) {
    let (x, y) = center(state, id);
    state.on_touch_start(x, y, at);
    let up = at + hold;
    state.on_touch_end(up);
    state.on_mouse_down(x, y, up + ms(5));
    state.on_mouse_up(x, y, up + ms(6));
    state.on_click(&KeyId::from(id), up + ms(7));
}

#[test]
fn test_mouse_tap_inserts_exactly_once() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    mouse_tap(&mut state, "q", t0);

    assert_eq!(state.buffer.value(), "q");
    assert_eq!(state.buffer.caret(), 1);
    assert!(matches!(state.phase(), PressPhase::Idle));
    assert!(state.active_key().is_none());
}

#[test]
fn test_touch_tap_with_emulated_mouse_inserts_once() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    touch_tap(&mut state, "q", t0, ms(60));

    assert_eq!(state.buffer.value(), "q");
    assert!(state.touch_active());
}

#[test]
fn test_long_touch_with_late_emulated_mouse_inserts_once() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    // Held well past the debounce gap; the emulated mouse-down must still be
    // recognized as part of the same tap.
    touch_tap(&mut state, "w", t0, ms(450));

    assert_eq!(state.buffer.value(), "w");
}

#[test]
fn test_emulated_mouse_down_does_not_start_press() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "e");

    state.on_touch_start(x, y, t0);
    state.on_touch_end(t0 + ms(50));
    state.on_mouse_down(x, y, t0 + ms(300));

    assert!(matches!(state.phase(), PressPhase::Idle));
    assert_eq!(state.buffer.value(), "e");
}

#[test]
fn test_separate_taps_each_insert() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    mouse_tap(&mut state, "h", t0);
    mouse_tap(&mut state, "i", t0 + ms(150));
    touch_tap(&mut state, "h", t0 + ms(1500), ms(60));
    touch_tap(&mut state, "i", t0 + ms(1700), ms(60));

    assert_eq!(state.buffer.value(), "hihi");
}

#[test]
fn test_press_start_within_debounce_is_swallowed() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "a");

    state.on_touch_start(x, y, t0);
    state.on_touch_end(t0 + ms(30));
    // Duplicate start some platforms fire for one tap
    state.on_touch_start(x, y, t0 + ms(60));
    state.on_touch_end(t0 + ms(80));

    assert_eq!(state.buffer.value(), "a");

    state.on_touch_start(x, y, t0 + ms(200));
    state.on_touch_end(t0 + ms(230));
    assert_eq!(state.buffer.value(), "aa");
}

#[test]
fn test_touch_drift_to_other_key_inserts_nothing() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (qx, qy) = center(&state, "q");
    let (wx, wy) = center(&state, "w");

    state.on_touch_start(qx, qy, t0);
    state.on_touch_move(wx, wy);
    assert!(state.active_key().is_none());

    state.on_touch_end(t0 + ms(80));
    state.on_mouse_down(wx, wy, t0 + ms(85));
    state.on_mouse_up(wx, wy, t0 + ms(86));
    state.on_click(&KeyId::from("w"), t0 + ms(87));

    assert_eq!(state.buffer.value(), "");
}

#[test]
fn test_touch_drift_off_keyboard_inserts_nothing() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "q");

    state.on_touch_start(x, y, t0);
    state.on_touch_move(-500.0, -500.0);
    state.on_touch_end(t0 + ms(60));

    assert_eq!(state.buffer.value(), "");
}

#[test]
fn test_touch_move_within_key_keeps_press() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "q");

    state.on_touch_start(x, y, t0);
    state.on_touch_move(x + 5.0, y - 5.0);
    assert_eq!(state.active_key().map(|k| k.id.as_str()), Some("q"));

    state.on_touch_end(t0 + ms(60));
    assert_eq!(state.buffer.value(), "q");
}

#[test]
fn test_mouse_release_over_other_key_inserts_nothing() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (qx, qy) = center(&state, "q");
    let (px, py) = center(&state, "p");

    state.on_mouse_down(qx, qy, t0);
    state.on_mouse_up(px, py, t0 + ms(100));

    assert_eq!(state.buffer.value(), "");
    assert!(matches!(state.phase(), PressPhase::Idle));
}

#[test]
fn test_stray_events_are_noops() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    // Press outside any key
    state.on_mouse_down(-10.0, -10.0, t0);
    assert!(state.active_key().is_none());

    // Releases with nothing active
    state.on_mouse_up(-10.0, -10.0, t0 + ms(10));
    state.on_touch_end(t0 + ms(20));
    state.on_touch_cancel(t0 + ms(30));
    state.on_mouse_leave();
    state.on_click(&KeyId::from("q"), t0 + ms(40));
    state.on_click(&KeyId::from("no-such-key"), t0 + ms(50));

    assert_eq!(state.buffer.value(), "");
    assert_eq!(state.tick(t0 + ms(5000)), 0);
}

#[test]
fn test_backspace_hold_repeats_until_release() {
    let mut state = create_test_input_state();
    state.buffer.set_value("abcdefgh");
    let t0 = Instant::now();
    let (x, y) = center(&state, "backspace");

    state.on_touch_start(x, y, t0);
    assert_eq!(state.buffer.value(), "abcdefg");
    assert!(state.is_repeating());
    assert_eq!(state.next_deadline(), Some(t0 + ms(300)));

    assert_eq!(state.tick(t0 + ms(299)), 0);
    assert_eq!(state.tick(t0 + ms(300)), 1);
    assert_eq!(state.tick(t0 + ms(400)), 1);
    assert_eq!(state.buffer.value(), "abcde");

    state.on_touch_end(t0 + ms(450));
    assert!(!state.is_repeating());
    assert_eq!(state.next_deadline(), None);

    // Emulated mouse events and later ticks delete nothing more
    state.on_mouse_down(x, y, t0 + ms(455));
    state.on_mouse_up(x, y, t0 + ms(456));
    state.on_click(&KeyId::from("backspace"), t0 + ms(457));
    assert_eq!(state.tick(t0 + ms(2000)), 0);
    assert_eq!(state.buffer.value(), "abcde");
}

#[test]
fn test_backspace_short_tap_deletes_once() {
    let mut state = create_test_input_state();
    state.buffer.set_value("xyz");
    let t0 = Instant::now();

    mouse_tap(&mut state, "backspace", t0);
    assert_eq!(state.tick(t0 + ms(1000)), 0);

    assert_eq!(state.buffer.value(), "xy");
}

#[test]
fn test_every_press_end_path_cancels_repeat() {
    let t0 = Instant::now();
    let ends: [(&str, fn(&mut InputState, Instant)); 4] = [
        ("mouse leave", |s, _| s.on_mouse_leave()),
        ("touch cancel", |s, at| s.on_touch_cancel(at)),
        ("touch end", |s, at| s.on_touch_end(at)),
        ("drift", |s, _| s.on_touch_move(-1.0, -1.0)),
    ];

    for (name, end) in ends {
        let mut state = create_test_input_state();
        state.buffer.set_value("0123456789");
        let (x, y) = center(&state, "backspace");

        state.on_touch_start(x, y, t0);
        state.tick(t0 + ms(350));
        end(&mut state, t0 + ms(360));

        assert!(!state.is_repeating(), "{name} left the repeat armed");
        state.tick(t0 + ms(10_000));
        assert_eq!(state.buffer.value(), "01234567", "{name}");
    }
}

#[test]
fn test_backspace_on_empty_buffer_is_noop() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "backspace");

    state.on_mouse_down(x, y, t0);
    state.tick(t0 + ms(800));
    state.on_mouse_up(x, y, t0 + ms(900));

    assert_eq!(state.buffer.value(), "");
    assert_eq!(state.buffer.caret(), 0);
}

#[test]
fn test_new_press_supersedes_held_press() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (qx, qy) = center(&state, "q");
    let (wx, wy) = center(&state, "w");

    state.on_mouse_down(qx, qy, t0);
    // Missed mouse-up, then a new press elsewhere
    state.on_mouse_down(wx, wy, t0 + ms(500));
    state.on_mouse_up(wx, wy, t0 + ms(550));

    assert_eq!(state.buffer.value(), "w");
}

#[test]
fn test_click_while_held_activates_once() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "z");

    state.on_mouse_down(x, y, t0);
    state.on_click(&KeyId::from("z"), t0 + ms(20));
    state.on_mouse_up(x, y, t0 + ms(30));
    state.on_click(&KeyId::from("z"), t0 + ms(31));

    assert_eq!(state.buffer.value(), "z");
}

#[test]
fn test_real_mouse_after_compat_window_starts_press() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    touch_tap(&mut state, "n", t0, ms(60));
    mouse_tap(&mut state, "o", t0 + ms(2000));

    assert_eq!(state.buffer.value(), "no");
    assert!(!state.touch_active());
}

#[test]
fn test_insert_replaces_selection() {
    let mut state = create_test_input_state();
    state.buffer.set_value("hello");
    state.buffer.set_selection(0, 5);

    mouse_tap(&mut state, "q", Instant::now());

    assert_eq!(state.buffer.value(), "q");
    assert_eq!(state.buffer.selection(), 1..1);
}

#[test]
fn test_shift_key_toggles_once_and_relabels() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    touch_tap(&mut state, "shift", t0, ms(60));
    assert!(state.shift_active());
    assert_eq!(state.label(&KeyId::from("q")).unwrap().primary, "Q");

    touch_tap(&mut state, "q", t0 + ms(1000), ms(60));
    assert_eq!(state.buffer.value(), "Q");
}

#[test]
fn test_language_toggle_relabels_to_arabic() {
    let mut state = create_test_input_state();
    assert_eq!(state.language_key_label(), "عربي");

    mouse_tap(&mut state, "lang", Instant::now());

    assert_eq!(state.language(), Language::Ar);
    assert_eq!(state.language_key_label(), "English");
    for key in state.layout().char_keys() {
        let expected = key.chars.ar.as_deref().or(key.chars.base.as_deref()).unwrap();
        assert_eq!(state.label(&key.id).unwrap().primary, expected);
    }

    mouse_tap(&mut state, "q", Instant::now() + ms(500));
    assert_eq!(state.buffer.value(), "ض");
}

#[test]
fn test_labels_match_inserted_text_in_every_state() {
    let layout = builtin::default_layout();
    for language in [Language::En, Language::Ar] {
        for shift_active in [false, true] {
            let settings = KeyboardSettings {
                language,
                shift_active,
                ..KeyboardSettings::default()
            };
            for key in layout.char_keys() {
                let mut state = InputState::new(layout.clone(), settings.clone());
                mouse_tap(&mut state, key.id.as_str(), Instant::now());
                let label = state.label(&key.id).unwrap();
                assert_eq!(state.buffer.value(), label.primary, "{} {language} {shift_active}", key.id);
            }
        }
    }
}

#[test]
fn test_space_enter_and_generators() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    mouse_tap(&mut state, "generate_name", t0);
    let name = state.buffer.value().to_string();
    assert_eq!(name.split(' ').count(), 2);

    mouse_tap(&mut state, "enter", t0 + ms(200));
    mouse_tap(&mut state, "generate_email", t0 + ms(400));
    mouse_tap(&mut state, "space", t0 + ms(600));

    let text = state.buffer.value();
    let (first_line, second_line) = text.split_once('\n').unwrap();
    assert_eq!(first_line, name);
    assert!(second_line.contains('@'));
    assert!(second_line.ends_with(' '));
    assert_eq!(state.buffer.caret(), text.chars().count());
}

#[test]
fn test_dark_mode_toggle() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    touch_tap(&mut state, "dark_mode", t0, ms(50));
    assert!(state.dark_mode());
    touch_tap(&mut state, "dark_mode", t0 + ms(1000), ms(50));
    assert!(!state.dark_mode());
    assert_eq!(state.buffer.value(), "");
}

#[test]
fn test_handle_event_dispatches() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "k");

    state.handle_event(&PointerEvent::TouchStart { x, y }, t0);
    state.handle_event(&PointerEvent::TouchMove { x, y }, t0 + ms(10));
    state.handle_event(&PointerEvent::TouchEnd, t0 + ms(40));
    state.handle_event(&PointerEvent::MouseDown { x, y }, t0 + ms(45));
    state.handle_event(&PointerEvent::MouseUp { x, y }, t0 + ms(46));
    state.handle_event(&PointerEvent::Click { key: KeyId::from("k") }, t0 + ms(47));

    assert_eq!(state.buffer.value(), "k");
}

#[test]
fn test_debounced_touch_during_mouse_hold_keeps_mouse_release() {
    let mut state = create_test_input_state();
    state.buffer.set_value("0123456789");
    let t0 = Instant::now();
    let (x, y) = center(&state, "backspace");

    state.on_mouse_down(x, y, t0);
    state.on_touch_start(x, y, t0 + ms(50));
    assert!(!state.touch_active());
    state.on_touch_end(t0 + ms(60));
    assert!(state.is_repeating());

    state.on_mouse_up(x, y, t0 + ms(200));
    assert!(!state.is_repeating());
    assert!(matches!(state.phase(), PressPhase::Idle));

    state.tick(t0 + ms(1000));
    assert_eq!(state.buffer.value(), "012345678");
}

#[test]
fn test_touch_after_debounce_supersedes_mouse_hold() {
    let mut state = create_test_input_state();
    state.buffer.set_value("0123456789");
    let t0 = Instant::now();
    let (bx, by) = center(&state, "backspace");
    let (x, y) = center(&state, "z");

    state.on_mouse_down(bx, by, t0);
    state.on_touch_start(x, y, t0 + ms(150));
    assert!(!state.is_repeating());
    assert_eq!(state.active_key().map(|key| key.id.as_str()), Some("z"));

    // The real mouse-up lands while the finger is down and is ignored.
    state.on_mouse_up(bx, by, t0 + ms(180));
    state.on_touch_end(t0 + ms(220));
    state.tick(t0 + ms(1000));

    assert_eq!(state.buffer.value(), "012345678z");
    assert!(matches!(state.phase(), PressPhase::Idle));
}

#[test]
fn test_mouse_leave_during_touch_press_cancels() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "r");

    state.on_touch_start(x, y, t0);
    state.on_mouse_leave();
    assert!(matches!(state.phase(), PressPhase::Idle));
    state.on_touch_end(t0 + ms(50));
    state.on_click(&KeyId::from("r"), t0 + ms(60));

    assert_eq!(state.buffer.value(), "");
}

#[test]
fn test_mouse_leave_during_backspace_touch_stops_repeat() {
    let mut state = create_test_input_state();
    state.buffer.set_value("abcdef");
    let t0 = Instant::now();
    let (x, y) = center(&state, "backspace");

    state.on_touch_start(x, y, t0);
    state.tick(t0 + ms(300));
    state.on_mouse_leave();
    state.tick(t0 + ms(2000));

    assert_eq!(state.buffer.value(), "abcd");
    assert!(!state.is_repeating());
}

#[test]
fn test_held_for_tracks_press_duration() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();
    let (x, y) = center(&state, "e");

    assert_eq!(state.held_for(t0), None);
    state.on_mouse_down(x, y, t0);
    assert_eq!(state.held_for(t0 + ms(250)), Some(ms(250)));
    state.on_mouse_up(x, y, t0 + ms(260));
    assert_eq!(state.held_for(t0 + ms(300)), None);
}

#[test]
fn test_take_redraw_clears_request() {
    let mut state = create_test_input_state();
    let t0 = Instant::now();

    assert!(state.take_redraw());
    assert!(!state.take_redraw());

    state.on_mouse_leave();
    state.on_click(&KeyId::from("q"), t0);
    assert!(!state.take_redraw());

    mouse_tap(&mut state, "q", t0);
    assert!(state.take_redraw());
    assert!(!state.needs_redraw);
}
