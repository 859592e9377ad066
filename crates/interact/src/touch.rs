//! Touch probing for a single target entity, with a proximity fallback
//! for targets that carry no collider.

use handcast_physics::{point_to_ray_distance, Ray};
use handcast_scene::{EntityId, Hit, Scene};
use tracing::debug;

/// How a touch probe resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchResult {
    /// A hit struck the target or one of its descendants.
    DirectHit {
        /// The struck entity (the target itself or a descendant).
        entity: EntityId,
    },
    /// No direct hit, but the ray passed within the fallback distance
    /// of the target's reference point.
    ProximityFallback {
        /// Minimum ray-to-target distance that qualified.
        distance: f32,
    },
    /// Not touched.
    Missed,
}

impl TouchResult {
    /// Whether the probe counts as a touch.
    pub fn touched(&self) -> bool {
        !matches!(self, TouchResult::Missed)
    }
}

/// Tests whether a ray touched one specific entity.
///
/// The fallback exists because the target may lack a collider entirely;
/// it trades hit precision for tolerance to imprecise pointing input.
#[derive(Debug, Clone, Copy)]
pub struct TouchProbe {
    target: EntityId,
    proximity_fallback: bool,
    fallback_distance: f32,
}

impl TouchProbe {
    /// Probe for `target` with the proximity fallback disabled.
    pub fn new(target: EntityId) -> Self {
        Self {
            target,
            proximity_fallback: false,
            fallback_distance: 0.0,
        }
    }

    /// Enable the proximity fallback within `distance` of the target.
    pub fn with_proximity_fallback(mut self, distance: f32) -> Self {
        self.proximity_fallback = true;
        self.fallback_distance = distance;
        self
    }

    /// The entity this probe tests for.
    pub fn target(&self) -> EntityId {
        self.target
    }

    /// Resolve `hits` (sorted ascending by distance) against the target.
    ///
    /// Touched if any hit's entity is the target or a descendant of it;
    /// otherwise, with the fallback enabled, touched if the minimum
    /// distance between `ray` and the target's reference point is within
    /// the configured threshold.
    pub fn probe(&self, scene: &Scene, hits: &[Hit], ray: &Ray) -> TouchResult {
        for hit in hits {
            debug!(entity = hit.entity.0, distance = hit.distance, "touch probe hit");
            if scene.is_descendant_of(hit.entity, self.target) {
                return TouchResult::DirectHit { entity: hit.entity };
            }
        }

        if self.proximity_fallback {
            if let Some(position) = scene.position(self.target) {
                let distance = point_to_ray_distance(ray, position);
                debug!(distance, threshold = self.fallback_distance, "touch probe fallback");
                if distance <= self.fallback_distance {
                    return TouchResult::ProximityFallback { distance };
                }
            }
        }

        TouchResult::Missed
    }
}
