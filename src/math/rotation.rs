use glam::{Quat, Vec3};

use super::basis::WORLD_UP;

/// Pitch about the camera's local `right` axis followed by yaw about world up,
/// combined into a single rotation. Angles are in degrees.
pub fn compose_pitch_yaw(right: Vec3, pitch_deg: f32, yaw_deg: f32) -> Quat {
    let pitch = Quat::from_axis_angle(right, pitch_deg.to_radians());
    let yaw = Quat::from_axis_angle(WORLD_UP, yaw_deg.to_radians());
    (yaw * pitch).normalize()
}

/// Apply `rotation` to a direction and renormalize it
pub fn rotate(rotation: Quat, direction: Vec3) -> Vec3 {
    (rotation * direction).normalize()
}

/// Yaw/pitch-only rotation of a look direction.
///
/// The direction is decomposed into heading (about world up, 0 = looking down -Z)
/// and elevation, the deltas are added, and elevation is clamped to
/// `±max_pitch_deg`. No roll can accumulate because the result is rebuilt from
/// the two angles every time.
pub fn constrained_pitch_yaw(forward: Vec3, pitch_deg: f32, yaw_deg: f32, max_pitch_deg: f32) -> Vec3 {
    let forward = forward.normalize();
    let heading = (-forward.x).atan2(-forward.z);
    let elevation = forward.y.clamp(-1.0, 1.0).asin();

    let limit = max_pitch_deg.to_radians();
    let heading = heading + yaw_deg.to_radians();
    let elevation = (elevation + pitch_deg.to_radians()).clamp(-limit, limit);

    let (sin_h, cos_h) = heading.sin_cos();
    let (sin_e, cos_e) = elevation.sin_cos();
    Vec3::new(-sin_h * cos_e, sin_e, -cos_h * cos_e)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn positive_pitch_looks_up() {
        let rotation = compose_pitch_yaw(Vec3::X, 90.0, 0.0);
        let forward = rotate(rotation, Vec3::NEG_Z);
        assert!((forward - Vec3::Y).length() < EPS, "got {forward:?}");
    }

    #[test]
    fn positive_yaw_turns_left() {
        let rotation = compose_pitch_yaw(Vec3::X, 0.0, 90.0);
        let forward = rotate(rotation, Vec3::NEG_Z);
        assert!((forward - Vec3::NEG_X).length() < EPS, "got {forward:?}");
    }

    #[test]
    fn composed_rotation_keeps_unit_length() {
        let mut forward = Vec3::NEG_Z;
        for i in 0..500 {
            let right = forward.cross(WORLD_UP).normalize();
            let rotation = compose_pitch_yaw(right, (i % 7) as f32 * 0.3 - 1.0, 2.5);
            forward = rotate(rotation, forward);
            assert!((forward.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn constrained_matches_composed_for_small_steps() {
        let composed = rotate(compose_pitch_yaw(Vec3::X, 10.0, 20.0), Vec3::NEG_Z);
        let constrained = constrained_pitch_yaw(Vec3::NEG_Z, 10.0, 20.0, 89.0);
        assert!((composed - constrained).length() < 1e-4);
    }

    #[test]
    fn constrained_clamps_elevation() {
        let forward = constrained_pitch_yaw(Vec3::NEG_Z, 170.0, 0.0, 80.0);
        let elevation = forward.y.asin().to_degrees();
        assert!((elevation - 80.0).abs() < 1e-3, "elevation {elevation}");
        assert!((forward.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn constrained_has_no_roll_drift() {
        let mut forward = Vec3::NEG_Z;
        for _ in 0..1000 {
            forward = constrained_pitch_yaw(forward, 0.7, 1.3, 89.0);
            forward = constrained_pitch_yaw(forward, -0.7, 0.0, 89.0);
        }
        assert!(forward.y.abs() < 1e-3, "elevation drifted: {forward:?}");
    }
}
