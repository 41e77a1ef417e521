use glam::{Mat4, Vec2, Vec3, Vec4};

/// OpenGL-convention perspective projection for a `width`x`height` target.
///
/// `None` for an empty viewport, which has no defined aspect ratio.
pub fn perspective(fov_deg: f32, width: u32, height: u32, near: f32, far: f32) -> Option<Mat4> {
    if width == 0 || height == 0 {
        return None;
    }
    let aspect = width as f32 / height as f32;
    Some(Mat4::perspective_rh_gl(fov_deg.to_radians(), aspect, near, far))
}

/// Map pixel `(x, y)` of a `width`x`height` target into `[-1, 1]` NDC
pub fn pixel_to_ndc(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        x as f32 / width as f32 * 2.0 - 1.0,
        y as f32 / height as f32 * 2.0 - 1.0,
    )
}

/// World-space ray direction through an NDC coordinate.
///
/// Unprojects the far-plane point `(ndc, 1, 1)`, divides by `w`, normalizes, then
/// rotates into world space with `w = 0` so the view translation is ignored.
pub fn unproject_direction(inverse_projection: &Mat4, inverse_view: &Mat4, ndc: Vec2) -> Vec3 {
    let target = *inverse_projection * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let view_dir = (target.truncate() / target.w).normalize();
    inverse_view.transform_vector3(view_dir)
}

/// NDC coordinate a world-space direction projects to; inverse of [`unproject_direction`]
pub fn project_direction(projection: &Mat4, view: &Mat4, direction: Vec3) -> Vec2 {
    let view_dir = view.transform_vector3(direction);
    let clip = *projection * view_dir.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}
