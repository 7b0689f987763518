/// OpenGL textures: GlTexture, GlCubeMap and GlShadowMap
///
/// These types hold GL object names only, so they can be shared across the
/// material system (`Arc<dyn Texture>`). Creation and destruction take the
/// GL context explicitly and must run on the thread owning it.

use glow::HasContext;
use galaxy_3d_shading::galaxy3d::{Error, Result};
use galaxy_3d_shading::galaxy3d::graphics::{CubeMap, ShadowMap, Texture, TextureHandle};
use galaxy_3d_shading::glam::Mat4;
use galaxy_3d_shading::{engine_debug, engine_error};
use crate::gl_conversion::texture_to_handle;

const SOURCE: &str = "galaxy3d::gl::Texture";

fn backend_error(message: String) -> Error {
    engine_error!(SOURCE, "{}", message);
    Error::BackendError(message)
}

/// Check that `data` holds `width * height` RGBA8 texels
fn check_rgba_len(data: &[u8], width: u32, height: u32, what: &str) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(backend_error(format!(
            "{}: expected {} bytes of RGBA data for {}x{}, got {}",
            what,
            expected,
            width,
            height,
            data.len()
        )));
    }
    Ok(())
}

unsafe fn set_sampling(gl: &glow::Context, target: u32, filter: u32, wrap: u32) {
    gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, filter as i32);
    gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, filter as i32);
    gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, wrap as i32);
    gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, wrap as i32);
}

// ===== 2D TEXTURE =====

#[derive(Debug)]
pub struct GlTexture {
    texture: glow::Texture,
    width: u32,
    height: u32,
}

impl GlTexture {
    /// Upload raw RGBA8 bytes to a new 2D texture
    pub fn upload_rgba(gl: &glow::Context, width: u32, height: u32, data: &[u8]) -> Result<Self> {
        check_rgba_len(data, width, height, "GlTexture")?;
        unsafe {
            let texture = gl
                .create_texture()
                .map_err(|e| backend_error(format!("Failed to create texture: {}", e)))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            set_sampling(gl, glow::TEXTURE_2D, glow::LINEAR, glow::REPEAT);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(data),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            engine_debug!(SOURCE, "Uploaded {}x{} texture {:?}", width, height, texture);
            Ok(Self { texture, width, height })
        }
    }

    pub fn raw(&self) -> glow::Texture {
        self.texture
    }

    /// Delete the GL texture
    pub fn destroy(self, gl: &glow::Context) {
        unsafe {
            gl.delete_texture(self.texture);
        }
    }
}

impl Texture for GlTexture {
    fn handle(&self) -> TextureHandle {
        texture_to_handle(self.texture)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

// ===== CUBE MAP =====

#[derive(Debug)]
pub struct GlCubeMap {
    texture: glow::Texture,
    face_size: u32,
}

impl GlCubeMap {
    /// Upload six square RGBA8 faces, in +X, -X, +Y, -Y, +Z, -Z order
    pub fn upload_rgba(gl: &glow::Context, face_size: u32, faces: [&[u8]; 6]) -> Result<Self> {
        for face in faces {
            check_rgba_len(face, face_size, face_size, "GlCubeMap face")?;
        }
        unsafe {
            let texture = gl
                .create_texture()
                .map_err(|e| backend_error(format!("Failed to create cube map: {}", e)))?;
            gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(texture));
            set_sampling(gl, glow::TEXTURE_CUBE_MAP, glow::LINEAR, glow::CLAMP_TO_EDGE);
            gl.tex_parameter_i32(
                glow::TEXTURE_CUBE_MAP,
                glow::TEXTURE_WRAP_R,
                glow::CLAMP_TO_EDGE as i32,
            );
            for (index, face) in faces.into_iter().enumerate() {
                gl.tex_image_2d(
                    glow::TEXTURE_CUBE_MAP_POSITIVE_X + index as u32,
                    0,
                    glow::RGBA as i32,
                    face_size as i32,
                    face_size as i32,
                    0,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    Some(face),
                );
            }
            gl.bind_texture(glow::TEXTURE_CUBE_MAP, None);

            engine_debug!(SOURCE, "Uploaded cube map {:?} ({} px faces)", texture, face_size);
            Ok(Self { texture, face_size })
        }
    }

    pub fn raw(&self) -> glow::Texture {
        self.texture
    }

    pub fn destroy(self, gl: &glow::Context) {
        unsafe {
            gl.delete_texture(self.texture);
        }
    }
}

impl CubeMap for GlCubeMap {
    fn handle(&self) -> TextureHandle {
        texture_to_handle(self.texture)
    }

    fn face_size(&self) -> u32 {
        self.face_size
    }
}

// ===== SHADOW MAP =====

/// Depth-only framebuffer rendered by the shadow pass
#[derive(Debug)]
pub struct GlShadowMap {
    depth_texture: glow::Texture,
    framebuffer: glow::Framebuffer,
    size: u32,
    light_space: Mat4,
}

impl GlShadowMap {
    /// Create a square depth target of `size` pixels
    pub fn new(gl: &glow::Context, size: u32) -> Result<Self> {
        unsafe {
            let framebuffer = gl
                .create_framebuffer()
                .map_err(|e| backend_error(format!("Failed to create shadow framebuffer: {}", e)))?;
            let depth_texture = match gl.create_texture() {
                Ok(texture) => texture,
                Err(e) => {
                    gl.delete_framebuffer(framebuffer);
                    return Err(backend_error(format!("Failed to create shadow depth texture: {}", e)));
                }
            };

            gl.bind_texture(glow::TEXTURE_2D, Some(depth_texture));
            set_sampling(gl, glow::TEXTURE_2D, glow::NEAREST, glow::CLAMP_TO_EDGE);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::DEPTH_COMPONENT24 as i32,
                size as i32,
                size as i32,
                0,
                glow::DEPTH_COMPONENT,
                glow::UNSIGNED_INT,
                None,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::TEXTURE_2D,
                Some(depth_texture),
                0,
            );
            gl.draw_buffer(glow::NONE);
            gl.read_buffer(glow::NONE);
            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(framebuffer);
                gl.delete_texture(depth_texture);
                return Err(backend_error(format!(
                    "Shadow framebuffer is not complete (status 0x{:X})",
                    status
                )));
            }

            engine_debug!(SOURCE, "Created {}x{} shadow map", size, size);
            Ok(Self {
                depth_texture,
                framebuffer,
                size,
                light_space: Mat4::IDENTITY,
            })
        }
    }

    /// Framebuffer the shadow pass renders depth into
    pub fn framebuffer(&self) -> glow::Framebuffer {
        self.framebuffer
    }

    /// Update the transform used by the last shadow pass
    pub fn set_light_space_matrix(&mut self, light_space: Mat4) {
        self.light_space = light_space;
    }

    pub fn destroy(self, gl: &glow::Context) {
        unsafe {
            gl.delete_framebuffer(self.framebuffer);
            gl.delete_texture(self.depth_texture);
        }
    }
}

impl ShadowMap for GlShadowMap {
    fn depth_texture(&self) -> TextureHandle {
        texture_to_handle(self.depth_texture)
    }

    fn width(&self) -> u32 {
        self.size
    }

    fn height(&self) -> u32 {
        self.size
    }

    fn light_space_matrix(&self) -> Mat4 {
        self.light_space
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "gl_texture_tests.rs"]
mod tests;
