use glam::Vec2;
use rustc_hash::FxHashMap;

/// Gesture produced by a touch move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchGesture {
    /// Single-finger drag delta.
    Orbit(Vec2),
    /// Two-finger update: midpoint, midpoint delta, and the ratio of the
    /// new inter-finger distance to the previous one.
    PanZoom {
        /// Current midpoint between the fingers.
        midpoint: Vec2,
        /// Midpoint motion since the last update.
        delta: Vec2,
        /// `> 1` when the fingers spread apart.
        ratio: f32,
    },
}

/// Shortest finger spacing used for pinch ratios.
const MIN_PINCH_DISTANCE: f32 = 1.0;

/// Active touches plus the two-finger baseline and tap candidate.
#[derive(Debug, Default)]
pub(crate) struct TouchState {
    touches: FxHashMap<u64, Vec2>,
    /// Midpoint and spacing from the last two-finger update.
    baseline: Option<(Vec2, f32)>,
    /// A lone finger that may still become a tap: id, start, moved.
    tap: Option<(u64, Vec2, bool)>,
}

impl TouchState {
    /// Number of fingers down.
    #[must_use]
    pub fn count(&self) -> usize {
        self.touches.len()
    }

    /// Whether the fingers down are orbiting or pinching rather than
    /// waiting to become a tap.
    #[must_use]
    pub fn is_gesturing(&self) -> bool {
        self.count() > 0 && !matches!(self.tap, Some((_, _, false)))
    }

    pub fn handle_start(&mut self, id: u64, pos: Vec2) {
        let _ = self.touches.insert(id, pos);
        self.tap = if self.touches.len() == 1 {
            Some((id, pos, false))
        } else {
            None
        };
        self.reset_baseline();
    }

    /// Update one finger. Unknown ids and three-plus finger moves produce
    /// no gesture.
    pub fn handle_move(&mut self, id: u64, pos: Vec2, drag_threshold: f32) -> Option<TouchGesture> {
        let prev = self.touches.get_mut(&id).map(|p| std::mem::replace(p, pos))?;

        if let Some((tap_id, start, moved)) = self.tap.as_mut() {
            if *tap_id == id && pos.distance(*start) > drag_threshold {
                *moved = true;
            }
        }

        match self.touches.len() {
            1 => Some(TouchGesture::Orbit(pos - prev)),
            2 => {
                let (mid, spacing) = self.pair_geometry()?;
                let (prev_mid, prev_spacing) = self.baseline.replace((mid, spacing))?;
                Some(TouchGesture::PanZoom {
                    midpoint: mid,
                    delta: mid - prev_mid,
                    ratio: spacing / prev_spacing,
                })
            }
            _ => None,
        }
    }

    /// Lift a finger. Returns the tap position when a lone finger is
    /// lifted without having moved past the threshold.
    pub fn handle_end(&mut self, id: u64) -> Option<Vec2> {
        let pos = self.touches.remove(&id)?;
        self.reset_baseline();
        match self.tap {
            Some((tap_id, _, moved)) if tap_id == id => {
                self.tap = None;
                (!moved && self.touches.is_empty()).then_some(pos)
            }
            _ => None,
        }
    }

    fn reset_baseline(&mut self) {
        self.baseline = if self.touches.len() == 2 {
            self.pair_geometry()
        } else {
            None
        };
    }

    fn pair_geometry(&self) -> Option<(Vec2, f32)> {
        let mut it = self.touches.values();
        let (a, b) = (*it.next()?, *it.next()?);
        Some(((a + b) * 0.5, a.distance(b).max(MIN_PINCH_DISTANCE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_finger_orbits_and_taps() {
        let mut t = TouchState::default();
        t.handle_start(1, Vec2::new(50.0, 50.0));
        assert_eq!(
            t.handle_move(1, Vec2::new(52.0, 51.0), 5.0),
            Some(TouchGesture::Orbit(Vec2::new(2.0, 1.0)))
        );
        assert_eq!(t.handle_end(1), Some(Vec2::new(52.0, 51.0)));
    }

    #[test]
    fn moved_finger_is_not_a_tap() {
        let mut t = TouchState::default();
        t.handle_start(1, Vec2::ZERO);
        let _ = t.handle_move(1, Vec2::new(20.0, 0.0), 5.0);
        assert_eq!(t.handle_end(1), None);
    }

    #[test]
    fn pinch_and_pan() {
        let mut t = TouchState::default();
        t.handle_start(1, Vec2::new(0.0, 0.0));
        t.handle_start(2, Vec2::new(100.0, 0.0));
        let g = t.handle_move(2, Vec2::new(200.0, 0.0), 5.0).unwrap();
        match g {
            TouchGesture::PanZoom { midpoint, delta, ratio } => {
                assert_eq!(midpoint, Vec2::new(100.0, 0.0));
                assert_eq!(delta, Vec2::new(50.0, 0.0));
                assert!((ratio - 2.0).abs() < 1e-6);
            }
            TouchGesture::Orbit(_) => unreachable!("expected pan/zoom"),
        }
        // Two-finger gestures never end in a tap.
        assert_eq!(t.handle_end(1), None);
        assert_eq!(t.handle_end(2), None);
    }

    #[test]
    fn lifting_to_one_finger_continues_without_jump() {
        let mut t = TouchState::default();
        t.handle_start(1, Vec2::new(0.0, 0.0));
        t.handle_start(2, Vec2::new(100.0, 0.0));
        let _ = t.handle_end(2);
        assert_eq!(
            t.handle_move(1, Vec2::new(3.0, 0.0), 5.0),
            Some(TouchGesture::Orbit(Vec2::new(3.0, 0.0)))
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut t = TouchState::default();
        assert_eq!(t.handle_move(9, Vec2::ONE, 5.0), None);
        assert_eq!(t.handle_end(9), None);
        assert_eq!(t.count(), 0);
    }
}
