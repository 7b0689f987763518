/*!
# Galaxy 3D Shading - OpenGL Backend

OpenGL implementation of the galaxy_3d_shading graphics traits, on top of
the glow bindings.

- **GlShader**: Linked program with a uniform location cache (`Shader`)
- **GlTexture** / **GlCubeMap**: Sampled textures (`Texture`, `CubeMap`)
- **GlShadowMap**: Depth framebuffer for the shadow pass (`ShadowMap`)

All types assume the GL context is current on the calling thread.
*/

mod gl_conversion;
mod gl_shader;
mod gl_texture;

pub use gl_shader::GlShader;
pub use gl_texture::{GlCubeMap, GlShadowMap, GlTexture};

/// Galaxy3D namespace for the OpenGL backend
pub mod galaxy3d {
    pub use crate::gl_shader::GlShader;
    pub use crate::gl_texture::{GlCubeMap, GlShadowMap, GlTexture};
}
