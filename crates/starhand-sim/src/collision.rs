//! Swept-sphere and ray tests used by both sides' projectiles.

use glam::DVec3;

/// Parameter in `[0, 1]` of the closest approach of segment `start→end`
/// to `center`, if that approach is within `radius`.
pub fn segment_sphere(start: DVec3, end: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let seg = end - start;
    let len_sq = seg.length_squared();
    let t = if len_sq > 0.0 {
        ((center - start).dot(seg) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = start + seg * t;
    (closest.distance(center) <= radius).then_some(t)
}

/// Distance along a unit-direction ray to its closest approach to
/// `center`, if that lies in `[0, max_range]` and within `radius`.
pub fn ray_sphere(
    origin: DVec3,
    direction: DVec3,
    max_range: f64,
    center: DVec3,
    radius: f64,
) -> Option<f64> {
    let t = (center - origin).dot(direction);
    if !(0.0..=max_range).contains(&t) {
        return None;
    }
    let perpendicular = (origin + direction * t).distance(center);
    (perpendicular < radius).then_some(t)
}
