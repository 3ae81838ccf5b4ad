//! Planar rotations and angle measurements in degrees
//!
//! Counter-clockwise is positive throughout. Rotations of tiles are stored as
//! degrees in `[0, 360)`, so every helper that produces an angle for storage
//! runs it through [`normalize_rotation`].

use glam::Vec2;

/// Rotate `vector` counter-clockwise by `angle_degrees`
pub fn rotate(vector: Vec2, angle_degrees: f32) -> Vec2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vec2::new(
        vector.x.mul_add(cos, -(vector.y * sin)),
        vector.y.mul_add(cos, vector.x * sin),
    )
}

/// Rotate `vector` counter-clockwise by `angle_degrees` around `pivot`
pub fn rotate_around(vector: Vec2, pivot: Vec2, angle_degrees: f32) -> Vec2 {
    rotate(vector - pivot, angle_degrees) + pivot
}

/// Signed angle from `from` to `to` in degrees, within `(-180, 180]`
///
/// Positive when `to` lies counter-clockwise of `from`. Returns 0 when
/// either vector has zero length.
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    if from == Vec2::ZERO || to == Vec2::ZERO {
        return 0.0;
    }
    from.perp_dot(to).atan2(from.dot(to)).to_degrees()
}

/// Unsigned angle from `from` to `to` in degrees, within `[0, 360)`
///
/// Negative signed angles are mapped by adding a full turn.
pub fn angle360(from: Vec2, to: Vec2) -> f32 {
    let angle = signed_angle(from, to);
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Reduce any angle into `[0, 360)`
///
/// Negative inputs map to `360 - (|angle| mod 360)`; an exact multiple of a
/// full turn lands on 0 rather than 360.
pub fn normalize_rotation(angle: f32) -> f32 {
    let reduced = if angle >= 360.0 {
        angle % 360.0
    } else if angle < 0.0 {
        360.0 - ((-angle) % 360.0)
    } else {
        angle
    };

    if reduced >= 360.0 { reduced - 360.0 } else { reduced }
}
