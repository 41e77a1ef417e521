use glam::Vec3;

/// World up axis shared by movement, view matrix and rotation
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Squared length of `forward x up` below which the basis is degenerate
const DEGENERATE_EPSILON_SQ: f32 = 1e-12;

/// Camera right vector for a look direction.
///
/// Returns `None` when `forward` is (nearly) parallel to [`WORLD_UP`], where the
/// cross product has no usable direction.
pub fn right_of(forward: Vec3) -> Option<Vec3> {
    let right = forward.cross(WORLD_UP);
    if right.length_squared() < DEGENERATE_EPSILON_SQ || !right.is_finite() {
        None
    } else {
        Some(right.normalize())
    }
}
