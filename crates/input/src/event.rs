use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bitset of pressed pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerButtons(pub u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);
    pub const SECONDARY: Self = Self(1 << 1);
    pub const AUXILIARY: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

/// A pointer sample in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
    /// Buttons held while this event fired.
    pub buttons: PointerButtons,
}

impl PointerEvent {
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self {
            client_x,
            client_y,
            buttons: PointerButtons::NONE,
        }
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn client(&self) -> Vec2 {
        Vec2::new(self.client_x, self.client_y)
    }
}

/// Unit of a wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

/// Scroll input. Positive `delta_y` scrolls down (away from the user).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelEvent {
    pub client_x: f32,
    pub client_y: f32,
    pub delta_x: f32,
    pub delta_y: f32,
    pub delta_mode: WheelDeltaMode,
}

/// Everything a host can forward to a render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove(PointerEvent),
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
    /// Press and release on the same surface.
    Click(PointerEvent),
    Wheel(WheelEvent),
}

/// On-screen rectangle of a render surface, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Translate a screen-space pointer position into surface-local pixels.
    pub fn to_local(&self, event: &PointerEvent) -> Vec2 {
        Vec2::new(event.client_x - self.left, event.client_y - self.top)
    }

    pub fn contains(&self, event: &PointerEvent) -> bool {
        let p = self.to_local(event);
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width && p.y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_local_subtracts_top_left() {
        let rect = SurfaceRect::new(120.0, 40.0, 800.0, 600.0);
        let local = rect.to_local(&PointerEvent::new(125.0, 47.0));
        assert_eq!(local, Vec2::new(5.0, 7.0));
    }

    #[test]
    fn to_local_can_go_negative_outside_surface() {
        let rect = SurfaceRect::new(10.0, 10.0, 100.0, 100.0);
        let ev = PointerEvent::new(0.0, 5.0);
        assert_eq!(rect.to_local(&ev), Vec2::new(-10.0, -5.0));
        assert!(!rect.contains(&ev));
        assert!(rect.contains(&PointerEvent::new(10.0, 10.0)));
    }

    #[test]
    fn button_set_operations() {
        let mut b = PointerButtons::NONE;
        assert!(!b.contains(PointerButtons::PRIMARY));
        b.insert(PointerButtons::PRIMARY);
        b.insert(PointerButtons::AUXILIARY);
        assert!(b.contains(PointerButtons::PRIMARY));
        assert!(!b.contains(PointerButtons::SECONDARY));
        b.remove(PointerButtons::PRIMARY);
        assert!(!b.contains(PointerButtons::PRIMARY));
        assert!(b.contains(PointerButtons::AUXILIARY));
    }

    #[test]
    fn input_event_variants() {
        let ev = PointerEvent::new(1.0, 2.0).with_buttons(PointerButtons::PRIMARY);
        assert!(matches!(InputEvent::Click(ev), InputEvent::Click(_)));
        assert!(matches!(
            InputEvent::Wheel(WheelEvent::default()),
            InputEvent::Wheel(_)
        ));
    }
}
