/// GlShader - OpenGL implementation of the Shader trait
///
/// Owns one linked program and the uniform location cache for it. Replacing
/// the program (hot reload, recompilation) deletes the old one and
/// invalidates the cache, so `uniform_location` never answers with a
/// location of a dead program. Parameters that cached locations themselves
/// still need `Material::discard_saved_uniforms_location`.

use std::cell::Cell;
use std::rc::Rc;
use glow::HasContext;
use galaxy_3d_shading::galaxy3d::{Error, Result};
use galaxy_3d_shading::galaxy3d::graphics::{
    Shader, ShaderId, TextureHandle, TextureTarget, UniformLocation, UniformLocationCache,
};
use galaxy_3d_shading::galaxy3d::material::Color;
use galaxy_3d_shading::glam::{Mat3, Mat4, Vec2, Vec3};
use galaxy_3d_shading::{engine_error, engine_info};
use crate::gl_conversion::{handle_to_texture, location_from_gl, location_to_gl, target_to_gl};

const SOURCE: &str = "galaxy3d::gl::Shader";

pub struct GlShader {
    id: ShaderId,
    gl: Rc<glow::Context>,
    program: Cell<glow::Program>,
    cache: UniformLocationCache,
}

impl GlShader {
    /// Take ownership of an already linked program
    pub fn new(gl: Rc<glow::Context>, program: glow::Program) -> Self {
        Self {
            id: ShaderId::next(),
            gl,
            program: Cell::new(program),
            cache: UniformLocationCache::new(),
        }
    }

    /// Compile and link a vertex/fragment program
    pub fn from_sources(gl: Rc<glow::Context>, vertex_source: &str, fragment_source: &str) -> Result<Self> {
        let program = link_program(&gl, vertex_source, fragment_source)?;
        Ok(Self::new(gl, program))
    }

    /// Current program
    pub fn program(&self) -> glow::Program {
        self.program.get()
    }

    pub fn cache(&self) -> &UniformLocationCache {
        &self.cache
    }

    /// Swap in a new linked program, deleting the old one
    pub fn replace_program(&self, program: glow::Program) {
        let old = self.program.replace(program);
        unsafe {
            self.gl.delete_program(old);
        }
        self.cache.invalidate();
        engine_info!(
            SOURCE,
            "Program {:?} replaced by {:?} (location cache generation {})",
            old,
            program,
            self.cache.generation()
        );
    }

    /// Recompile from sources; the current program is kept on failure
    pub fn recompile(&self, vertex_source: &str, fragment_source: &str) -> Result<()> {
        let program = link_program(&self.gl, vertex_source, fragment_source)?;
        self.replace_program(program);
        Ok(())
    }
}

impl Shader for GlShader {
    fn id(&self) -> ShaderId {
        self.id
    }

    fn bind(&self) {
        unsafe {
            self.gl.use_program(Some(self.program.get()));
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.use_program(None);
        }
    }

    fn uniform_location(&self, name: &str) -> UniformLocation {
        self.cache.get_or_query(name, |name| unsafe {
            location_from_gl(self.gl.get_uniform_location(self.program.get(), name))
        })
    }

    fn set_bool(&self, location: UniformLocation, value: bool) {
        self.set_int(location, value as i32);
    }

    fn set_int(&self, location: UniformLocation, value: i32) {
        if let Some(location) = location_to_gl(location) {
            unsafe {
                self.gl.uniform_1_i32(Some(&location), value);
            }
        }
    }

    fn set_float(&self, location: UniformLocation, value: f32) {
        if let Some(location) = location_to_gl(location) {
            unsafe {
                self.gl.uniform_1_f32(Some(&location), value);
            }
        }
    }

    fn set_vector2(&self, location: UniformLocation, value: Vec2) {
        if let Some(location) = location_to_gl(location) {
            unsafe {
                self.gl.uniform_2_f32(Some(&location), value.x, value.y);
            }
        }
    }

    fn set_vector3(&self, location: UniformLocation, value: Vec3) {
        if let Some(location) = location_to_gl(location) {
            unsafe {
                self.gl.uniform_3_f32(Some(&location), value.x, value.y, value.z);
            }
        }
    }

    fn set_color(&self, location: UniformLocation, value: Color) {
        if let Some(location) = location_to_gl(location) {
            unsafe {
                self.gl
                    .uniform_4_f32(Some(&location), value.r, value.g, value.b, value.a);
            }
        }
    }

    fn set_matrix3(&self, location: UniformLocation, value: &Mat3) {
        if let Some(location) = location_to_gl(location) {
            unsafe {
                self.gl
                    .uniform_matrix_3_f32_slice(Some(&location), false, &value.to_cols_array());
            }
        }
    }

    fn set_matrix4(&self, location: UniformLocation, value: &Mat4) {
        if let Some(location) = location_to_gl(location) {
            unsafe {
                self.gl
                    .uniform_matrix_4_f32_slice(Some(&location), false, &value.to_cols_array());
            }
        }
    }

    fn set_active_texture_unit(&self, unit: u32) {
        let Some(texture_unit) = glow::TEXTURE0.checked_add(unit) else {
            return;
        };
        unsafe {
            self.gl.active_texture(texture_unit);
        }
    }

    fn bind_texture(&self, target: TextureTarget, texture: Option<TextureHandle>) {
        unsafe {
            self.gl
                .bind_texture(target_to_gl(target), texture.and_then(handle_to_texture));
        }
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program.get());
        }
    }
}

/// Compile both stages and link them; every GL object is released on failure
fn link_program(gl: &glow::Context, vertex_source: &str, fragment_source: &str) -> Result<glow::Program> {
    unsafe {
        let program = gl.create_program().map_err(|e| backend_error(format!("Cannot create program: {}", e)))?;

        let stages = [
            (glow::VERTEX_SHADER, "vertex", vertex_source),
            (glow::FRAGMENT_SHADER, "fragment", fragment_source),
        ];
        let mut shaders = Vec::with_capacity(stages.len());

        for (stage, stage_name, source) in stages {
            let shader = match gl.create_shader(stage) {
                Ok(shader) => shader,
                Err(e) => {
                    release(gl, program, &shaders);
                    return Err(backend_error(format!("Cannot create {} shader: {}", stage_name, e)));
                }
            };
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            gl.attach_shader(program, shader);
            shaders.push(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                release(gl, program, &shaders);
                return Err(backend_error(format!("{} shader compile error: {}", stage_name, log)));
            }
        }

        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            release(gl, program, &shaders);
            return Err(backend_error(format!("Program link error: {}", log)));
        }

        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
        Ok(program)
    }
}

unsafe fn release(gl: &glow::Context, program: glow::Program, shaders: &[glow::Shader]) {
    for shader in shaders {
        gl.detach_shader(program, *shader);
        gl.delete_shader(*shader);
    }
    gl.delete_program(program);
}

fn backend_error(message: String) -> Error {
    engine_error!(SOURCE, "{}", message);
    Error::BackendError(message)
}
