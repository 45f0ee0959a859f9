use super::event::{Modifiers, WheelMode};

/// Pixels per wheel line.
pub(crate) const LINE_HEIGHT: f32 = 100.0;
/// Pixels per wheel page.
pub(crate) const PAGE_HEIGHT: f32 = 800.0;

/// Camera operation a wheel event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelGesture {
    /// Notched wheel or trackpad pinch.
    Zoom,
    /// Shift + two-finger scroll.
    Pan,
    /// Plain two-finger trackpad scroll.
    Orbit,
}

/// Convert a wheel delta to pixels.
pub(crate) fn to_pixels(dx: f32, dy: f32, mode: WheelMode) -> (f32, f32) {
    let scale = match mode {
        WheelMode::Pixel => 1.0,
        WheelMode::Line => LINE_HEIGHT,
        WheelMode::Page => PAGE_HEIGHT,
    };
    (dx * scale, dy * scale)
}

/// Whether a pixel delta looks like a notched mouse wheel: a large delta
/// along exactly one axis.
pub(crate) fn is_mouse_wheel_like(dx: f32, dy: f32, threshold: f32) -> bool {
    (dx == 0.0 && dy.abs() >= threshold) || (dy == 0.0 && dx.abs() >= threshold)
}

/// Classify a wheel event (deltas already in pixels).
pub fn classify(dx: f32, dy: f32, mode: WheelMode, mods: Modifiers, threshold: f32) -> WheelGesture {
    if mode != WheelMode::Pixel || is_mouse_wheel_like(dx, dy, threshold) {
        return WheelGesture::Zoom;
    }
    if mods.ctrl || mods.meta {
        // Browsers and macOS report trackpad pinch as ctrl + wheel.
        return WheelGesture::Zoom;
    }
    if mods.shift {
        return WheelGesture::Pan;
    }
    WheelGesture::Orbit
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f32 = 50.0;

    #[test]
    fn notched_wheel_zooms() {
        let none = Modifiers::default();
        assert_eq!(classify(0.0, 100.0, WheelMode::Pixel, none, T), WheelGesture::Zoom);
        assert_eq!(classify(-120.0, 0.0, WheelMode::Pixel, none, T), WheelGesture::Zoom);
        assert_eq!(classify(0.3, 1.0, WheelMode::Line, none, T), WheelGesture::Zoom);
        // Shift does not turn a notched wheel into a pan.
        let shift = Modifiers { shift: true, ..none };
        assert_eq!(classify(0.0, 100.0, WheelMode::Pixel, shift, T), WheelGesture::Zoom);
    }

    #[test]
    fn trackpad_gestures() {
        let none = Modifiers::default();
        let ctrl = Modifiers { ctrl: true, ..none };
        let meta = Modifiers { meta: true, ..none };
        let shift = Modifiers { shift: true, ..none };
        assert_eq!(classify(3.0, 4.0, WheelMode::Pixel, none, T), WheelGesture::Orbit);
        assert_eq!(classify(0.0, 4.0, WheelMode::Pixel, none, T), WheelGesture::Orbit);
        assert_eq!(classify(3.0, 4.0, WheelMode::Pixel, ctrl, T), WheelGesture::Zoom);
        assert_eq!(classify(3.0, 4.0, WheelMode::Pixel, meta, T), WheelGesture::Zoom);
        assert_eq!(classify(3.0, 4.0, WheelMode::Pixel, shift, T), WheelGesture::Pan);
    }

    #[test]
    fn line_mode_scales_to_pixels() {
        assert_eq!(to_pixels(0.0, 1.0, WheelMode::Line), (0.0, LINE_HEIGHT));
        assert_eq!(to_pixels(2.0, -3.0, WheelMode::Pixel), (2.0, -3.0));
    }
}
