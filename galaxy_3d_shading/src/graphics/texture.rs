/// Texture, CubeMap and ShadowMap resource traits
///
/// These resources are owned by the surrounding resource manager. The
/// shading layer only holds shared references to them and reads their
/// binding handle and dimensions.

use glam::Mat4;

/// Backend binding handle of a texture object (GL texture name, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// 2D texture resource trait
pub trait Texture: Send + Sync {
    /// Backend handle used to bind the texture
    fn handle(&self) -> TextureHandle;

    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;
}

/// Cube map resource trait
pub trait CubeMap: Send + Sync {
    /// Backend handle used to bind the cube map
    fn handle(&self) -> TextureHandle;

    /// Edge length of one face in pixels
    fn face_size(&self) -> u32;
}

/// Shadow map resource trait
///
/// A depth render target produced by a shadow pass, plus the light-space
/// transform needed to sample it.
pub trait ShadowMap: Send + Sync {
    /// Depth texture handle (bound as a 2D texture)
    fn depth_texture(&self) -> TextureHandle;

    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// World to light clip space transform
    fn light_space_matrix(&self) -> Mat4;
}
