/// Conversions between shading-layer handles and glow native handles.
///
/// Texture names and uniform locations cross the backend boundary as plain
/// integers. GL never hands out texture name 0 and reports absent uniforms
/// as `None`, which maps onto `UniformLocation::INVALID`.

use std::num::NonZeroU32;
use galaxy_3d_shading::galaxy3d::graphics::{TextureHandle, TextureTarget, UniformLocation};

/// Engine handle of a GL texture name
pub(crate) fn texture_to_handle(texture: glow::Texture) -> TextureHandle {
    TextureHandle(texture.0.get())
}

/// GL texture name of an engine handle (`None` for handle 0)
pub(crate) fn handle_to_texture(handle: TextureHandle) -> Option<glow::Texture> {
    NonZeroU32::new(handle.0).map(glow::NativeTexture)
}

/// Engine location of a queried GL location
pub(crate) fn location_from_gl(location: Option<glow::UniformLocation>) -> UniformLocation {
    match location {
        Some(location) => i32::try_from(location.0)
            .map(UniformLocation)
            .unwrap_or(UniformLocation::INVALID),
        None => UniformLocation::INVALID,
    }
}

/// GL location of an engine location (`None` if invalid)
pub(crate) fn location_to_gl(location: UniformLocation) -> Option<glow::UniformLocation> {
    location
        .is_valid()
        .then(|| glow::NativeUniformLocation(location.0 as u32))
}

/// GL bind target of a texture target
pub(crate) fn target_to_gl(target: TextureTarget) -> u32 {
    match target {
        TextureTarget::Texture2D => glow::TEXTURE_2D,
        TextureTarget::CubeMap => glow::TEXTURE_CUBE_MAP,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "gl_conversion_tests.rs"]
mod tests;
