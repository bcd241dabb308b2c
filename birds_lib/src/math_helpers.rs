use glam::DVec2;

use crate::options::WorldBounds;

/// Shortest signed delta from `a` to `b` on a circle of circumference `size`.
///
/// The straight-line delta is only one candidate; once it crosses more than
/// half the space, the path through the seam is shorter and the sign flips
/// accordingly.
/// Originally inspired by toroidal distance as per [source](https://blog.demofox.org/2017/10/01/calculating-the-distance-between-points-in-wrap-around-toroidal-space/),
/// with a modification to preserve directionality.
#[inline]
pub fn tor_vec_pc(a: f64, b: f64, size: f64) -> f64 {
    let d = b - a;
    if d > size / 2. {
        d - size
    } else if d < -size / 2. {
        d + size
    } else {
        d
    }
}

/// Displacement vector along the shortest path from `p` to `q` in the
/// toroidal world rectangle.
pub fn tor_vec(p: DVec2, q: DVec2, bounds: &WorldBounds) -> DVec2 {
    DVec2::new(
        tor_vec_pc(p.x, q.x, bounds.size()),
        tor_vec_pc(p.y, q.y, bounds.size()),
    )
}

/// Euclidean distance between two points with wrap-around topology.
/// Symmetric in its arguments, never negative, bounded by `size/2 * sqrt(2)`.
pub fn toroidal_distance(p: DVec2, q: DVec2, bounds: &WorldBounds) -> f64 {
    tor_vec(p, q, bounds).length()
}

/// Scales `v` down to magnitude `max` when it is longer, preserving
/// direction; shorter vectors pass through unchanged. Not a component-wise
/// clamp.
pub fn clamp_magnitude(v: DVec2, max: f64) -> DVec2 {
    let length = v.length();
    if length > max {
        v * (max / length)
    } else {
        v
    }
}

/// Steering step of the classic flocking model: normalize the target
/// direction, scale it to `max_speed`, subtract the current velocity and
/// bound the resulting velocity change by `max_force`.
///
/// A zero-magnitude target cannot be normalized and yields a zero delta.
pub fn steering_delta(target: DVec2, velocity: DVec2, max_speed: f64, max_force: f64) -> DVec2 {
    if target.length_squared() == 0. {
        return DVec2::ZERO;
    }

    let desired = target.normalize() * max_speed;
    clamp_magnitude(desired - velocity, max_force)
}

/// Toroidal re-entry for one axis: past the upper bound comes back in at the
/// lower edge by the overshoot, and symmetrically for the lower bound.
#[inline]
pub fn wrap_component(value: f64, min: f64, max: f64) -> f64 {
    if value > max {
        min + (value - max)
    } else if value < min {
        max - (min - value)
    } else {
        value
    }
}

/// Heading of a velocity vector in degrees.
#[inline]
pub fn heading_deg(v: DVec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Velocity vector of magnitude `speed` pointing at `heading` degrees.
#[inline]
pub fn velocity_from_heading(speed: f64, heading: f64) -> DVec2 {
    let rad = heading.to_radians();
    DVec2::new(speed * rad.cos(), speed * rad.sin())
}
