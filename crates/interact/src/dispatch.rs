//! Click dispatch: nearest capable target wins, UI controls first.

use glam::Vec3;
use handcast_camera::Camera;
use handcast_scene::Hit;
use tracing::debug;

use crate::{Capability, ControlId, InteractionMap};

/// Pointer button carried by synthesized events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// The only button the gesture input can produce.
    Left,
}

/// Synthesized pointer-event payload for generic click handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Hit point projected through the reference camera, in pixels.
    pub screen_position: (f32, f32),
    /// Button the event represents.
    pub button: PointerButton,
}

/// A handled click: which control fired, on which entity, with what payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    /// Entity whose capability handled the click.
    pub entity: handcast_scene::EntityId,
    /// Control callback to activate.
    pub control: ControlId,
    /// Pointer payload; present only for pointer-handler targets.
    pub event: Option<PointerEvent>,
}

/// Walks ordered hit lists and resolves them to click outcomes.
///
/// Retains the last hit point and whether a UI control was struck, for
/// debug overlays.
#[derive(Debug, Default)]
pub struct ClickDispatcher {
    last_hit_point: Option<Vec3>,
    struck_ui_control: bool,
}

impl ClickDispatcher {
    /// Create a dispatcher with no recorded hits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch `hits` (sorted ascending by distance) to the first
    /// interactive target.
    ///
    /// UI controls take strict precedence: the first hit exposing one
    /// handles the click with a plain activation and the walk stops.
    /// Otherwise the first hit exposing a pointer handler receives a
    /// synthesized [`PointerEvent`] whose screen position is the hit
    /// point projected through `camera`. Returns `None` when no hit
    /// yields a target; there is no proximity fallback on this path.
    pub fn dispatch(
        &mut self,
        hits: &[Hit],
        map: &InteractionMap,
        camera: &Camera,
        screen_size: (u32, u32),
    ) -> Option<ClickOutcome> {
        debug_assert!(
            hits.windows(2).all(|w| w[0].distance <= w[1].distance),
            "hit list must be sorted ascending by distance"
        );

        self.last_hit_point = None;
        self.struck_ui_control = false;

        for hit in hits {
            self.last_hit_point = Some(hit.point);
            if let Some(Capability::UiControl { control }) = map.capability(hit.entity) {
                debug!(entity = hit.entity.0, control, distance = hit.distance, "click hit UI control");
                self.struck_ui_control = true;
                return Some(ClickOutcome {
                    entity: hit.entity,
                    control,
                    event: None,
                });
            }
        }

        for hit in hits {
            if let Some(Capability::PointerHandler { handler }) = map.capability(hit.entity) {
                let event = PointerEvent {
                    // Off-screen projection still yields a payload; the
                    // handler decides what to do with it
                    screen_position: camera
                        .world_to_screen(hit.point, screen_size)
                        .unwrap_or((-1.0, -1.0)),
                    button: PointerButton::Left,
                };
                debug!(entity = hit.entity.0, handler, distance = hit.distance, "click hit pointer handler");
                return Some(ClickOutcome {
                    entity: hit.entity,
                    control: handler,
                    event: Some(event),
                });
            }
        }

        debug!(hits = hits.len(), "click unhandled");
        None
    }

    /// Hit point recorded by the most recent dispatch, if any.
    pub fn last_hit_point(&self) -> Option<Vec3> {
        self.last_hit_point
    }

    /// Whether the most recent dispatch struck a UI control.
    pub fn struck_ui_control(&self) -> bool {
        self.struck_ui_control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Capability;
    use handcast_scene::EntityId;

    fn hit(entity: u64, distance: f32) -> Hit {
        Hit {
            entity: EntityId(entity),
            point: Vec3::new(0.0, 0.0, distance),
            distance,
        }
    }

    fn camera() -> Camera {
        Camera::default()
    }

    #[test]
    fn nearest_ui_control_wins() {
        let mut map = InteractionMap::new();
        map.register(EntityId(1), Capability::UiControl { control: 10 });
        map.register(EntityId(2), Capability::UiControl { control: 20 });

        let mut dispatcher = ClickDispatcher::new();
        let outcome = dispatcher
            .dispatch(
                &[hit(1, 1.0), hit(2, 2.0)],
                &map,
                &camera(),
                (1280, 720),
            )
            .expect("handled");

        assert_eq!(outcome.control, 10);
        assert!(outcome.event.is_none());
        assert!(dispatcher.struck_ui_control());
    }

    #[test]
    fn ui_control_outranks_nearer_pointer_handler() {
        let mut map = InteractionMap::new();
        map.register(EntityId(1), Capability::PointerHandler { handler: 10 });
        map.register(EntityId(2), Capability::UiControl { control: 20 });

        let mut dispatcher = ClickDispatcher::new();
        let outcome = dispatcher
            .dispatch(
                &[hit(1, 1.0), hit(2, 2.0)],
                &map,
                &camera(),
                (1280, 720),
            )
            .expect("handled");

        assert_eq!(outcome.control, 20);
        assert!(outcome.event.is_none());
    }

    #[test]
    fn pointer_handler_gets_synthesized_event() {
        let mut map = InteractionMap::new();
        map.register(EntityId(3), Capability::PointerHandler { handler: 30 });

        let cam = camera();
        let point = cam.position + cam.forward() * 2.0;
        let hits = [Hit {
            entity: EntityId(3),
            point,
            distance: 2.0,
        }];

        let mut dispatcher = ClickDispatcher::new();
        let outcome = dispatcher
            .dispatch(&hits, &map, &cam, (1280, 720))
            .expect("handled");

        let event = outcome.event.expect("pointer payload");
        assert_eq!(event.button, PointerButton::Left);
        // Forward hit point lands at the screen center
        assert!((event.screen_position.0 - 640.0).abs() < 0.5);
        assert!((event.screen_position.1 - 360.0).abs() < 0.5);
    }

    #[test]
    fn no_capable_hit_returns_none() {
        let map = InteractionMap::new();

        let mut dispatcher = ClickDispatcher::new();
        let outcome = dispatcher.dispatch(&[hit(1, 1.0)], &map, &camera(), (1280, 720));

        assert!(outcome.is_none());
        assert!(!dispatcher.struck_ui_control());
        assert!(dispatcher.last_hit_point().is_some());
    }

    #[test]
    fn empty_hit_list_is_unhandled() {
        let map = InteractionMap::new();

        let mut dispatcher = ClickDispatcher::new();
        assert!(dispatcher
            .dispatch(&[], &map, &camera(), (1280, 720))
            .is_none());
        assert!(dispatcher.last_hit_point().is_none());
    }
}
