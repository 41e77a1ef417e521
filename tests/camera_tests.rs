use glam::{Vec2, Vec3};
use progressive_tracer::camera::{Camera, RotationMode};
use progressive_tracer::config::CameraConfig;
use progressive_tracer::core::{Action, InputState};
use progressive_tracer::math;
use progressive_tracer::traits::CursorMode;

const EPS: f32 = 1e-5;

fn camera(width: u32, height: u32) -> Camera {
    Camera::new(&CameraConfig::default(), width, height)
}

fn look(delta: Vec2) -> InputState {
    InputState::default()
        .with_held(Action::Look)
        .with_pointer_delta(delta)
}

#[cfg(test)]
mod navigation_tests {
    use super::*;

    #[test]
    fn test_idle_frame_changes_nothing() {
        let mut cam = camera(800, 800);
        let before = cam.pose();

        for dt in [0.001, 0.016, 0.5] {
            let update = cam.update(dt, &InputState::default());
            assert!(!update.moved);
            assert_eq!(update.cursor, CursorMode::Free);
        }
        assert_eq!(cam.pose(), before);
    }

    #[test]
    fn test_forward_moves_at_reference_speed() {
        let mut cam = camera(800, 800);
        let input = InputState::default().with_held(Action::MoveForward);

        let update = cam.update(0.5, &input);

        assert!(update.moved);
        let expected = Vec3::new(0.0, 0.0, 3.0) + Vec3::NEG_Z * 5.0 * 0.5;
        assert!((cam.position() - expected).length() < EPS, "got {:?}", cam.position());
    }

    #[test]
    fn test_opposite_keys_first_listed_wins() {
        let mut cam = camera(800, 800);
        let input = InputState::default()
            .with_held(Action::MoveForward)
            .with_held(Action::MoveBack);

        cam.update(1.0, &input);
        assert!((cam.position() - Vec3::new(0.0, 0.0, -2.0)).length() < EPS);
    }

    #[test]
    fn test_strafe_and_vertical_movement() {
        let mut cam = camera(800, 800);
        let input = InputState::default()
            .with_held(Action::MoveRight)
            .with_held(Action::MoveUp);

        cam.update(0.2, &input);
        assert!((cam.position() - Vec3::new(1.0, 1.0, 3.0)).length() < EPS);
    }

    #[test]
    fn test_pointer_ignored_without_look() {
        let mut cam = camera(800, 800);
        let input = InputState::default().with_pointer_delta(Vec2::new(40.0, -25.0));

        let update = cam.update(0.016, &input);

        assert!(!update.moved);
        assert_eq!(update.cursor, CursorMode::Free);
        assert_eq!(cam.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_look_captures_cursor() {
        let mut cam = camera(800, 800);
        let update = cam.update(0.016, &look(Vec2::ZERO));

        assert_eq!(update.cursor, CursorMode::Captured);
        assert!(!update.moved);
    }

    #[test]
    fn test_rotation_keeps_unit_forward() {
        for mode in [RotationMode::Composed, RotationMode::Constrained] {
            let config = CameraConfig {
                rotation: mode,
                ..CameraConfig::default()
            };
            let mut cam = Camera::new(&config, 320, 240);

            for i in 0..200 {
                let delta = Vec2::new(13.0 + i as f32 * 0.7, -7.0 + (i % 11) as f32);
                cam.update(0.016, &look(delta));
                assert!((cam.forward().length() - 1.0).abs() < EPS, "{mode:?}");
            }
        }
    }

    #[test]
    fn test_pointer_left_turns_left() {
        let mut cam = camera(800, 800);
        cam.set_rotation_speed(1.0);

        cam.update(0.016, &look(Vec2::new(-90.0, 0.0)));

        assert!((cam.forward() - Vec3::NEG_X).length() < 1e-4, "got {:?}", cam.forward());
    }

    #[test]
    fn test_rotation_onto_world_up_is_rejected() {
        let mut cam = camera(800, 800);
        cam.set_rotation_speed(1.0);

        let update = cam.update(0.016, &look(Vec2::new(0.0, -90.0)));

        assert!(!update.moved);
        assert_eq!(cam.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_constrained_pitch_stops_short_of_pole() {
        let config = CameraConfig {
            rotation: RotationMode::Constrained,
            rotation_speed: 1.0,
            ..CameraConfig::default()
        };
        let mut cam = Camera::new(&config, 800, 800);

        cam.update(0.016, &look(Vec2::new(0.0, -150.0)));

        let limit = 89.0_f32.to_radians().sin();
        assert!((cam.forward().y - limit).abs() < 1e-4, "got {:?}", cam.forward());
        assert!(math::right_of(cam.forward()).is_some());
    }
}

#[cfg(test)]
mod zoom_tests {
    use super::*;

    #[test]
    fn test_zoom_press_steps_and_counts_as_motion() {
        let mut cam = camera(800, 800);
        let update = cam.update(0.016, &InputState::default().with_pressed(Action::FovIncrease));

        assert!(update.moved);
        assert_eq!(cam.fov_deg(), 63.0);
    }

    #[test]
    fn test_zoom_held_does_not_repeat() {
        let mut cam = camera(800, 800);
        let held = InputState::default().with_held(Action::FovDecrease);

        cam.update(0.016, &held);
        assert_eq!(cam.fov_deg(), 60.0);
    }

    #[test]
    fn test_zoom_clamps_at_limits() {
        let mut cam = camera(800, 800);
        let zoom_in = InputState::default().with_pressed(Action::FovDecrease);

        for _ in 0..40 {
            cam.update(0.016, &zoom_in);
        }
        assert_eq!(cam.fov_deg(), 10.0);

        let update = cam.update(0.016, &zoom_in);
        assert!(!update.moved);
    }

    #[test]
    fn test_fixed_fov_ignores_zoom() {
        let config = CameraConfig {
            fov_mutable: false,
            ..CameraConfig::default()
        };
        let mut cam = Camera::new(&config, 800, 800);

        let update = cam.update(0.016, &InputState::default().with_pressed(Action::FovIncrease));
        assert!(!update.moved);
        assert_eq!(cam.fov_deg(), 60.0);
    }
}

#[cfg(test)]
mod ray_tests {
    use super::*;

    #[test]
    fn test_center_ray_of_square_viewport() {
        let cam = camera(800, 800);
        let dir = cam.ray_direction(400, 400).unwrap();
        assert!((dir - Vec3::NEG_Z).length() < EPS, "got {dir:?}");
    }

    #[test]
    fn test_corner_ray_matches_half_fov() {
        let cam = camera(800, 800);
        let low = cam.ray_direction(0, 0).unwrap();
        let ndc = math::pixel_to_ndc(0, 0, 800, 800);
        let half_fov = 30.0_f32.to_radians().tan();

        assert!((low.x / -low.z - ndc.x * half_fov).abs() < 1e-4);
        assert!((low.y / -low.z - ndc.y * half_fov).abs() < 1e-4);
    }

    #[test]
    fn test_ray_directions_are_unit_length() {
        let cam = camera(64, 48);
        for dir in cam.ray_directions().as_slice() {
            assert!((dir.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_resize_round_trip_recovers_ndc() {
        let mut cam = camera(800, 800);
        cam.update(0.016, &look(Vec2::new(35.0, 12.0)));
        cam.update(0.3, &InputState::default().with_held(Action::MoveLeft));

        assert!(cam.resize(640, 480));
        assert_eq!(cam.ray_directions().len(), 640 * 480);

        for (x, y) in [(0, 0), (639, 0), (320, 240), (17, 401), (639, 479)] {
            let dir = cam.ray_direction(x, y).unwrap();
            let ndc = math::project_direction(&cam.projection_matrix(), &cam.view_matrix(), dir);
            let expected = math::pixel_to_ndc(x, y, 640, 480);
            assert!((ndc - expected).length() < 1e-4, "pixel ({x}, {y}): {ndc:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_resize_to_same_size_is_noop() {
        let mut cam = camera(320, 200);
        assert!(!cam.resize(320, 200));
        assert!(cam.resize(320, 201));
        assert_eq!(cam.viewport(), (320, 201));
    }

    #[test]
    fn test_rays_follow_camera_after_motion() {
        let mut cam = camera(101, 101);
        cam.set_rotation_speed(1.0);
        cam.update(0.016, &look(Vec2::new(-90.0, 0.0)));

        let center = cam.ray_direction(50, 50).unwrap();
        let expected = cam.forward();
        // Pixel 50 sits half a pixel left and below the exact center
        assert!((center - expected).length() < 0.02, "got {center:?}");
    }

    #[test]
    fn test_matrices_are_inverse_pairs() {
        let mut cam = camera(800, 600);
        cam.update(0.1, &InputState::default().with_held(Action::MoveUp));

        let view = cam.view_matrix() * cam.inverse_view_matrix();
        let proj = cam.projection_matrix() * cam.inverse_projection_matrix();
        assert!(view.abs_diff_eq(glam::Mat4::IDENTITY, 1e-4));
        assert!(proj.abs_diff_eq(glam::Mat4::IDENTITY, 1e-4));
    }
}
