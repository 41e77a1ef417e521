use crate::uniforms::{SlotKind, UniformValue};

/// Tracer parameters as laid out in the shader's uniform block
///
/// Matches `struct Params` in `shaders/tracer.wgsl`; each vec3 shares its
/// 16-byte row with the scalar that follows it.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TracerUniform {
    pub ray_origin: [f32; 3],
    pub fov: f32,
    pub forward_dir: [f32; 3],
    pub time: f32,
    pub viewport_size: [f32; 2],
    pub mouse: [f32; 2],
    pub bounces: i32,
    pub num_samples: i32,
    pub _pad: [i32; 2],
}

/// Named members of [`TracerUniform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformField {
    RayOrigin,
    Fov,
    ForwardDir,
    Time,
    ViewportSize,
    Mouse,
    Bounces,
    NumSamples,
}

impl UniformField {
    pub const ALL: [UniformField; 8] = [
        UniformField::RayOrigin,
        UniformField::Fov,
        UniformField::ForwardDir,
        UniformField::Time,
        UniformField::ViewportSize,
        UniformField::Mouse,
        UniformField::Bounces,
        UniformField::NumSamples,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UniformField::RayOrigin => "RayOrigin",
            UniformField::Fov => "FOV",
            UniformField::ForwardDir => "ForwardDir",
            UniformField::Time => "Time",
            UniformField::ViewportSize => "ViewportSize",
            UniformField::Mouse => "Mouse",
            UniformField::Bounces => "Bounces",
            UniformField::NumSamples => "NumSamples",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn kind(self) -> SlotKind {
        match self {
            UniformField::RayOrigin | UniformField::ForwardDir => SlotKind::Vec3,
            UniformField::ViewportSize | UniformField::Mouse => SlotKind::Vec2,
            UniformField::Fov | UniformField::Time => SlotKind::Float,
            UniformField::Bounces | UniformField::NumSamples => SlotKind::Int,
        }
    }
}

impl TracerUniform {
    /// Store a value in the named member. Returns false when the value's type
    /// does not match the member.
    pub fn write(&mut self, field: UniformField, value: UniformValue) -> bool {
        match (field, value) {
            (UniformField::RayOrigin, UniformValue::Vec3(v)) => self.ray_origin = v.to_array(),
            (UniformField::ForwardDir, UniformValue::Vec3(v)) => self.forward_dir = v.to_array(),
            (UniformField::ViewportSize, UniformValue::Vec2(v)) => self.viewport_size = v.to_array(),
            (UniformField::Mouse, UniformValue::Vec2(v)) => self.mouse = v.to_array(),
            (UniformField::Fov, UniformValue::Float(v)) => self.fov = v,
            (UniformField::Time, UniformValue::Float(v)) => self.time = v,
            (UniformField::Bounces, UniformValue::Int(v)) => self.bounces = v,
            (UniformField::NumSamples, UniformValue::Int(v)) => self.num_samples = v,
            _ => return false,
        }
        true
    }
}
