use crate::input::events::{PointerEvent, PointerSource, PressEnd};
use crate::input::repeat::RepeatTask;
use crate::layout::{HitTest, KeyId, KeyKind};
use log::{debug, trace};
use std::time::Instant;

use super::{InputState, PressPhase};

impl InputState {
    /// Dispatches one host event.
    pub fn handle_event(&mut self, event: &PointerEvent, now: Instant) {
        trace!("event {:?}", event);
        match *event {
            PointerEvent::TouchStart { x, y } => self.on_touch_start(x, y, now),
            PointerEvent::TouchMove { x, y } => self.on_touch_move(x, y),
            PointerEvent::TouchEnd => self.on_touch_end(now),
            PointerEvent::TouchCancel => self.on_touch_cancel(now),
            PointerEvent::MouseDown { x, y } => self.on_mouse_down(x, y, now),
            PointerEvent::MouseUp { x, y } => self.on_mouse_up(x, y, now),
            PointerEvent::MouseLeave => self.on_mouse_leave(),
            PointerEvent::Click { ref key } => self.on_click(key, now),
        }
    }

    /// Processes a touch start.
    ///
    /// Marks the interaction as touch-driven so the mouse events the platform
    /// synthesizes afterwards are recognized and ignored.
    pub fn on_touch_start(&mut self, x: f64, y: f64, now: Instant) {
        // Touch flags only change for an accepted start.
        if self.begin_press(x, y, PointerSource::Touch, now) {
            self.touch_active = true;
            self.touch_ended_at = None;
        }
    }

    /// Processes touch motion.
    ///
    /// Moving off the pressed key (onto another key or onto nothing) cancels
    /// the press without inserting anything.
    pub fn on_touch_move(&mut self, x: f64, y: f64) {
        let PressPhase::Pressed {
            key,
            source: PointerSource::Touch,
            ..
        } = &self.phase
        else {
            return;
        };

        let still_on_key = self.layout.key_at(x, y).is_some_and(|hit| &hit.id == key);
        if !still_on_key {
            self.end_press(PressEnd::Drift);
        }
    }

    pub fn on_touch_end(&mut self, now: Instant) {
        self.finish_touch(PressEnd::Release, now);
    }

    pub fn on_touch_cancel(&mut self, now: Instant) {
        self.finish_touch(PressEnd::Cancel, now);
    }

    /// Processes a mouse button press.
    ///
    /// Ignored when it is the emulated mouse-down following a touch.
    pub fn on_mouse_down(&mut self, x: f64, y: f64, now: Instant) {
        if self.is_emulated_mouse(now) {
            debug!("Ignoring emulated mouse-down after touch");
            return;
        }
        if self.begin_press(x, y, PointerSource::Mouse, now) {
            self.touch_active = false;
        }
    }

    /// Processes a mouse button release.
    ///
    /// Releasing over a different key than the one pressed counts as drift.
    pub fn on_mouse_up(&mut self, x: f64, y: f64, now: Instant) {
        if self.is_emulated_mouse(now) {
            debug!("Ignoring emulated mouse-up after touch");
            return;
        }
        let PressPhase::Pressed {
            key,
            source: PointerSource::Mouse,
            ..
        } = &self.phase
        else {
            return;
        };

        let over_key = self.layout.key_at(x, y).is_some_and(|hit| &hit.id == key);
        let cause = if over_key { PressEnd::Release } else { PressEnd::Drift };
        self.end_press(cause);
    }

    /// Pointer left the surface: ends any press without activating it.
    pub fn on_mouse_leave(&mut self) {
        self.end_press(PressEnd::Leave);
    }

    /// Processes a click on a key element.
    ///
    /// A click is the last event of a tap and normally finds the press
    /// already completed; it only activates a key that is still held and has
    /// not produced its effect yet.
    pub fn on_click(&mut self, key: &KeyId, now: Instant) {
        if self.is_emulated_mouse(now) {
            debug!("Ignoring emulated click on '{}' after touch", key);
            return;
        }
        let holds_key = matches!(&self.phase, PressPhase::Pressed { key: held, .. } if held == key);
        if holds_key && !self.has_inserted {
            self.end_press(PressEnd::Release);
        }
    }

    /// Fires any repeat ticks due at `now`. Returns how many fired.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let Some(task) = self.repeat.as_mut() else {
            return 0;
        };
        let due = task.poll(now);
        for _ in 0..due {
            if self.buffer.delete_backward() {
                self.needs_redraw = true;
            }
        }
        if due > 0 {
            trace!(
                "Repeat fired {} time(s), held for {:?}",
                due,
                self.held_for(now).unwrap_or_default()
            );
        }
        due
    }

    /// Starts a press at `(x, y)`. Returns `false` when the start was
    /// debounced and nothing changed.
    fn begin_press(&mut self, x: f64, y: f64, source: PointerSource, now: Instant) -> bool {
        if let Some(last) = self.last_press_at {
            if now.saturating_duration_since(last) < self.timing.debounce {
                debug!("Debounced {:?} press start", source);
                return false;
            }
        }
        self.last_press_at = Some(now);

        if !matches!(self.phase, PressPhase::Idle) {
            self.end_press(PressEnd::Cancel);
        }

        let Some(hit) = self.layout.key_at(x, y) else {
            trace!("Press at ({x}, {y}) hit no key");
            return true;
        };
        let key = hit.id.clone();
        let kind = hit.kind;

        debug!("Pressed '{}' via {:?}", key, source);
        self.phase = PressPhase::Pressed {
            key,
            source,
            started_at: now,
        };
        self.has_inserted = false;
        self.needs_redraw = true;

        if kind == KeyKind::Backspace {
            self.delete_backward();
            self.has_inserted = true;
            self.repeat = Some(RepeatTask::arm(
                now,
                self.timing.hold_delay,
                self.timing.repeat_interval,
            ));
        }
        true
    }

    fn finish_touch(&mut self, cause: PressEnd, now: Instant) {
        if self.touch_active {
            self.touch_ended_at = Some(now);
        }
        if matches!(
            self.phase,
            PressPhase::Pressed {
                source: PointerSource::Touch,
                ..
            }
        ) {
            self.end_press(cause);
        }
    }

    /// The single exit from `Pressed`: every end cause clears the repeat
    /// task, and only a release activates the key.
    pub(super) fn end_press(&mut self, cause: PressEnd) {
        self.repeat = None;

        let PressPhase::Pressed { key, .. } = std::mem::replace(&mut self.phase, PressPhase::Idle)
        else {
            return;
        };

        debug!("Press on '{}' ended: {:?}", key, cause);
        if cause == PressEnd::Release && !self.has_inserted {
            self.activate(&key);
        }
        self.has_inserted = true;
        self.needs_redraw = true;
    }

    /// Mouse events inside the compatibility window after a touch are the
    /// platform's emulation of that touch, not a new interaction.
    fn is_emulated_mouse(&self, now: Instant) -> bool {
        if !self.touch_active {
            return false;
        }
        match self.touch_ended_at {
            // Touch still down
            None => true,
            Some(ended) => now.saturating_duration_since(ended) <= self.timing.touch_compat_window,
        }
    }
}
