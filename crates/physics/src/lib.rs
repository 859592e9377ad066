#![warn(missing_docs)]
//! Ray-query primitives shared by the pointer and touch paths.

use glam::Vec3;
use handcast_core::CoreError;

/// A bounded ray: origin, pre-normalized direction, and reach.
///
/// Immutable once constructed per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin in world space.
    pub origin: Vec3,
    /// Direction; callers must normalize before construction.
    pub direction: Vec3,
    /// Maximum hit distance; always positive.
    pub max_distance: f32,
}

impl Ray {
    /// Create a ray, validating the caller's contract.
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Result<Self, CoreError> {
        if !(max_distance > 0.0) {
            return Err(CoreError::InvalidMaxDistance(max_distance));
        }
        if !direction.is_normalized() {
            return Err(CoreError::InvalidDirection);
        }
        Ok(Self {
            origin,
            direction,
            max_distance,
        })
    }

    /// Point at parameter `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box collider shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z).
    pub min: Vec3,
    /// Maximum corner (x, y, z).
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Create an AABB from center position and size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Test if a ray intersects this AABB.
    /// Returns distance to the intersection point if hit.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vec3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // If tmax < 0, the entire AABB is behind the origin
        if tmax < 0.0 {
            return None;
        }

        // If tmin > tmax, the ray misses
        if tmin > tmax {
            return None;
        }

        // If tmin < 0, the origin is inside the AABB
        let distance = if tmin < 0.0 { tmax } else { tmin };

        Some(distance)
    }
}

/// Sphere collider shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center in world space.
    pub center: Vec3,
    /// Radius; must be positive.
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius > 0.0);
        Self { center, radius }
    }

    /// Test if a ray intersects this sphere.
    /// Returns distance to the nearest intersection in front of the origin.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let to_center = self.center - ray.origin;
        let projection = to_center.dot(ray.direction);
        let closest_sq = to_center.length_squared() - projection * projection;
        let radius_sq = self.radius * self.radius;

        if closest_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - closest_sq).sqrt();
        let near = projection - half_chord;
        let far = projection + half_chord;

        if far < 0.0 {
            return None;
        }

        // Origin inside the sphere hits the far wall
        Some(if near < 0.0 { far } else { near })
    }
}

/// Minimum distance between a bounded ray and a point.
///
/// Projects the point onto the ray (`t = dot(p - o, d)`), clamps the
/// parameter to `[0, max_distance]`, and measures from the clamped
/// closest point. Used as the proximity fallback for collider-less
/// touch targets.
pub fn point_to_ray_distance(ray: &Ray, point: Vec3) -> f32 {
    let t = (point - ray.origin)
        .dot(ray.direction)
        .clamp(0.0, ray.max_distance);
    ray.point_at(t).distance(point)
}
