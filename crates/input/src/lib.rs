#![warn(missing_docs)]
//! Hand-tracking input: gesture edge detection and cursor smoothing.

use glam::Vec3;
use handcast_camera::Camera;

/// Whether the tracked hand is open or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripState {
    /// Hand open (no gesture).
    Open,
    /// Hand closed (the click gesture).
    Closed,
}

/// One tracked-hand sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFrame {
    /// Hand position in world space.
    pub position: Vec3,
    /// Grip state reported by the tracker.
    pub grip: GripState,
}

/// Source of hand-tracking data, injected by the host.
///
/// Called once per tick; `None` means no hand is tracked this frame.
pub trait HandTracker {
    /// Latest hand sample, if a hand is tracked.
    fn sample(&mut self) -> Option<HandFrame>;
}

/// Edge-triggered detector for the hand-closed gesture.
///
/// Holding the hand closed fires once; the gesture must be released
/// before it can fire again.
#[derive(Debug, Default)]
pub struct GestureDetector {
    was_closed: bool,
}

impl GestureDetector {
    /// Create a detector with no gesture history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's grip state; true exactly on open -> closed.
    pub fn hand_just_closed(&mut self, grip: GripState) -> bool {
        let closed = grip == GripState::Closed;
        let fired = closed && !self.was_closed;
        self.was_closed = closed;
        fired
    }

    /// Reset gesture history (e.g. when tracking is lost).
    pub fn clear(&mut self) {
        self.was_closed = false;
    }
}

/// Smooths the 3D cursor toward the projected hand position.
///
/// The raw hand position is projected through the reference camera and
/// re-anchored a fixed depth in front of it, then the cursor eases
/// toward that target. Noisy tracking input makes the easing necessary.
#[derive(Debug, Clone)]
pub struct CursorFilter {
    position: Vec3,
    /// Easing rate; higher snaps faster.
    smoothing: f32,
    /// Forward distance from the camera where the cursor lives.
    depth: f32,
}

impl CursorFilter {
    /// Create a filter starting at `initial`.
    pub fn new(initial: Vec3, smoothing: f32, depth: f32) -> Self {
        Self {
            position: initial,
            smoothing,
            depth,
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Advance the cursor toward the hand's projected anchor point.
    ///
    /// A hand the camera cannot project (at or behind the camera
    /// plane) leaves the cursor where it is.
    pub fn update(
        &mut self,
        camera: &Camera,
        screen_size: (u32, u32),
        hand_position: Vec3,
        dt: f32,
    ) -> Vec3 {
        if let Some(screen) = camera.world_to_screen(hand_position, screen_size) {
            let target = camera.screen_to_world(screen, screen_size, self.depth);
            let t = (dt * self.smoothing).clamp(0.0, 1.0);
            self.position = self.position.lerp(target, t);
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: (u32, u32) = (1280, 720);

    #[test]
    fn gesture_fires_once_per_close() {
        let mut detector = GestureDetector::new();

        assert!(!detector.hand_just_closed(GripState::Open));
        assert!(detector.hand_just_closed(GripState::Closed));
        assert!(!detector.hand_just_closed(GripState::Closed));
        assert!(!detector.hand_just_closed(GripState::Open));
        assert!(detector.hand_just_closed(GripState::Closed));
    }

    #[test]
    fn gesture_clear_forgets_held_close() {
        let mut detector = GestureDetector::new();
        detector.hand_just_closed(GripState::Closed);

        detector.clear();
        assert!(detector.hand_just_closed(GripState::Closed));
    }

    #[test]
    fn cursor_converges_to_projected_hand() {
        let camera = Camera::default();
        let mut filter = CursorFilter::new(camera.position, 5.0, 2.0);

        // Hand sitting on the camera axis, past the cursor depth
        let hand = camera.position + camera.forward() * 4.0;
        let mut position = filter.position();
        for _ in 0..120 {
            position = filter.update(&camera, SCREEN, hand, 1.0 / 60.0);
        }

        // The cursor settles on the camera axis at the anchor depth
        let expected = camera.position + camera.forward() * 2.0;
        assert!(position.distance(expected) < 0.01);
    }

    #[test]
    fn cursor_anchors_at_configured_depth() {
        let camera = Camera::default();
        let mut filter = CursorFilter::new(camera.position, 5.0, 2.0);

        let hand = camera.position + camera.forward() * 6.0 + Vec3::new(0.0, 0.5, 0.0);
        let mut position = filter.position();
        for _ in 0..240 {
            position = filter.update(&camera, SCREEN, hand, 1.0 / 60.0);
        }

        let depth = (position - camera.position).dot(camera.forward());
        assert!((depth - 2.0).abs() < 0.01);
    }

    #[test]
    fn unprojectable_hand_freezes_cursor() {
        let camera = Camera::default();
        let start = Vec3::new(0.3, 0.2, 0.1);
        let mut filter = CursorFilter::new(start, 5.0, 2.0);

        let behind = camera.position - camera.forward() * 3.0;
        let position = filter.update(&camera, SCREEN, behind, 1.0 / 60.0);

        assert_eq!(position, start);
    }
}
