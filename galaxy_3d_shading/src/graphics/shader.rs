/// Shader trait and uniform location handle
///
/// A Shader wraps one compiled, linked GPU program. It is the binding layer
/// the material system writes into: location queries, typed uniform setters
/// and texture unit selection. Implementations are backend-specific
/// (e.g. GlShader) and keep a UniformLocationCache that they invalidate
/// whenever their program is replaced.

use std::sync::atomic::{AtomicU64, Ordering};
use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::graphics::TextureHandle;
use crate::material::Color;

/// Opaque uniform location inside one specific program
///
/// `UniformLocation::INVALID` (-1) is returned for names the program does not
/// expose. Setters receiving it must silently do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

impl UniformLocation {
    /// Sentinel for "no such uniform in the program"
    pub const INVALID: UniformLocation = UniformLocation(-1);

    /// Whether this location designates an active uniform
    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl Default for UniformLocation {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Identity of one Shader object, unique for the process lifetime
///
/// Cached locations are tagged with it: a location resolved by one shader
/// is never reused with another. Relinking keeps the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(u64);

impl ShaderId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        ShaderId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    /// 2D texture (also used for shadow map depth textures)
    Texture2D,
    /// Cube map texture
    CubeMap,
}

/// Compiled shader program trait
///
/// All methods assume a current graphics context on the calling thread.
/// Uniform setters act on the currently bound program: callers bind the
/// shader before sending parameters.
///
/// Texture binding protocol for one sampler uniform:
/// 1. `set_active_texture_unit(unit)`
/// 2. `bind_texture(target, handle)`
/// 3. `set_int(sampler_location, unit)`
pub trait Shader {
    /// Identity of this shader object (see `ShaderId::next`)
    fn id(&self) -> ShaderId;

    /// Make this program current
    fn bind(&self);

    /// Unbind any program
    fn unbind(&self);

    /// Resolve a uniform name, `UniformLocation::INVALID` if absent
    fn uniform_location(&self, name: &str) -> UniformLocation;

    fn set_bool(&self, location: UniformLocation, value: bool);
    fn set_int(&self, location: UniformLocation, value: i32);
    fn set_float(&self, location: UniformLocation, value: f32);
    fn set_vector2(&self, location: UniformLocation, value: Vec2);
    fn set_vector3(&self, location: UniformLocation, value: Vec3);
    fn set_color(&self, location: UniformLocation, value: Color);
    fn set_matrix3(&self, location: UniformLocation, value: &Mat3);
    fn set_matrix4(&self, location: UniformLocation, value: &Mat4);

    /// Select the texture unit subsequent `bind_texture` calls affect
    fn set_active_texture_unit(&self, unit: u32);

    /// Bind (or with `None`, unbind) a texture on the active unit
    fn bind_texture(&self, target: TextureTarget, texture: Option<TextureHandle>);
}
