use scenekit_input::{InputEvent, PointerButtons, PointerEvent, WheelDeltaMode, WheelEvent};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Tracks cursor position and held buttons so winit's separate cursor, button
/// and wheel events can be turned into self-contained [`InputEvent`]s.
///
/// Positions are logical pixels relative to the window's client area.
#[derive(Debug, Default)]
pub struct PointerState {
    x: f32,
    y: f32,
    buttons: PointerButtons,
}

fn button_mask(button: MouseButton) -> PointerButtons {
    match button {
        MouseButton::Left => PointerButtons::PRIMARY,
        MouseButton::Right => PointerButtons::SECONDARY,
        MouseButton::Middle => PointerButtons::AUXILIARY,
        _ => PointerButtons::NONE,
    }
}

impl PointerState {
    fn event(&self) -> PointerEvent {
        PointerEvent::new(self.x, self.y).with_buttons(self.buttons)
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>, scale_factor: f64) -> InputEvent {
        let logical = position.to_logical::<f32>(scale_factor);
        self.x = logical.x;
        self.y = logical.y;
        InputEvent::PointerMove(self.event())
    }

    /// A press yields `PointerDown`; a release yields `PointerUp`, followed by
    /// `Click` when the primary button was let go.
    pub fn button(&mut self, button: MouseButton, state: ElementState) -> Vec<InputEvent> {
        let mask = button_mask(button);
        match state {
            ElementState::Pressed => {
                self.buttons.insert(mask);
                vec![InputEvent::PointerDown(self.event())]
            }
            ElementState::Released => {
                let was_primary = mask == PointerButtons::PRIMARY
                    && self.buttons.contains(PointerButtons::PRIMARY);
                self.buttons.remove(mask);
                let mut events = vec![InputEvent::PointerUp(self.event())];
                if was_primary {
                    events.push(InputEvent::Click(self.event()));
                }
                events
            }
        }
    }

    /// winit reports scrolling up as positive; wheel events use positive for
    /// scrolling down.
    pub fn wheel(&self, delta: MouseScrollDelta, scale_factor: f64) -> InputEvent {
        let (delta_x, delta_y, delta_mode) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (-x, -y, WheelDeltaMode::Line),
            MouseScrollDelta::PixelDelta(p) => {
                let logical = p.to_logical::<f32>(scale_factor);
                (-logical.x, -logical.y, WheelDeltaMode::Pixel)
            }
        };
        InputEvent::Wheel(WheelEvent {
            client_x: self.x,
            client_y: self.y,
            delta_x,
            delta_y,
            delta_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_position_is_logical() {
        let mut p = PointerState::default();
        let ev = p.cursor_moved(PhysicalPosition::new(200.0, 100.0), 2.0);
        assert_eq!(ev, InputEvent::PointerMove(PointerEvent::new(100.0, 50.0)));
    }

    #[test]
    fn primary_release_clicks_at_cursor() {
        let mut p = PointerState::default();
        p.cursor_moved(PhysicalPosition::new(10.0, 20.0), 1.0);

        let down = p.button(MouseButton::Left, ElementState::Pressed);
        let held = PointerEvent::new(10.0, 20.0).with_buttons(PointerButtons::PRIMARY);
        assert_eq!(down, vec![InputEvent::PointerDown(held)]);

        let moved = p.cursor_moved(PhysicalPosition::new(12.0, 20.0), 1.0);
        assert!(matches!(moved, InputEvent::PointerMove(e) if e.buttons.contains(PointerButtons::PRIMARY)));

        let up = p.button(MouseButton::Left, ElementState::Released);
        let released = PointerEvent::new(12.0, 20.0);
        assert_eq!(
            up,
            vec![InputEvent::PointerUp(released), InputEvent::Click(released)]
        );
    }

    #[test]
    fn secondary_release_does_not_click() {
        let mut p = PointerState::default();
        p.button(MouseButton::Right, ElementState::Pressed);
        let up = p.button(MouseButton::Right, ElementState::Released);
        assert_eq!(up.len(), 1);
    }

    #[test]
    fn wheel_up_is_negative_delta() {
        let p = PointerState::default();
        let InputEvent::Wheel(w) = p.wheel(MouseScrollDelta::LineDelta(0.0, 1.0), 1.0) else {
            panic!("expected wheel event");
        };
        assert_eq!(w.delta_y, -1.0);
        assert_eq!(w.delta_mode, WheelDeltaMode::Line);

        let InputEvent::Wheel(w) =
            p.wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)), 2.0)
        else {
            panic!("expected wheel event");
        };
        assert_eq!(w.delta_y, 20.0);
        assert_eq!(w.delta_mode, WheelDeltaMode::Pixel);
    }
}
