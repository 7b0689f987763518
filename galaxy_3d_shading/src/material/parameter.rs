/// Material parameter: one named shading value bound to one shader uniform.
///
/// A Parameter knows its material-local `name`, the `uniform_name` it writes
/// to, and lazily caches the uniform location of the program it was last
/// sent to. Compound kinds (TextureBool, CubeMapBool) also write a derived
/// validity boolean to a companion uniform, with its own cached location.
///
/// Location caching:
/// - Uncached -> Cached on the first `send_to_shader` or `save_uniform_location`
/// - Cached -> Uncached on `discard_save`
///
/// A cached location is tagged with the `ShaderId` that resolved it and is
/// re-resolved when the parameter is sent to another shader, so a parameter
/// shared by materials with different programs always writes the right
/// uniform. Relinking keeps the id: after a shader is recompiled, callers
/// must call `discard_save` (or `Material::discard_saved_uniforms_location`)
/// before the next send.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;
use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::error::{Error, Result};
use crate::graphics::{
    BindingContext, CubeMap, Shader, ShaderId, Texture, TextureHandle, TextureTarget,
    UniformLocation,
};
use crate::material::{
    Color, NumericRange, ParameterEditor, ParameterKind, ParameterType, ParameterValue,
    VALIDITY_PREFIX,
};
use crate::engine_warn;

const SOURCE: &str = "galaxy3d::Parameter";

/// Location plus the shader that resolved it
type CachedLocation = Cell<Option<(ShaderId, UniformLocation)>>;

// ===== COMPANION UNIFORM =====

/// Validity boolean written next to a compound parameter's resource
#[derive(Debug)]
struct CompanionUniform {
    uniform_name: String,
    location: CachedLocation,
}

impl CompanionUniform {
    fn new(uniform_name: String) -> Self {
        Self { uniform_name, location: Cell::new(None) }
    }
}

/// Cached lookup: query once per shader, then reuse
fn resolve_location(cell: &CachedLocation, shader: &dyn Shader, uniform_name: &str) -> UniformLocation {
    match cell.get() {
        Some((id, location)) if id == shader.id() => location,
        _ => {
            let location = shader.uniform_location(uniform_name);
            cell.set(Some((shader.id(), location)));
            location
        }
    }
}

// ===== PARAMETER =====

pub struct Parameter {
    name: String,
    uniform_name: String,
    editable: bool,
    location: CachedLocation,
    companion: Option<CompanionUniform>,
    value: ParameterValue,
}

impl Parameter {
    /// Create an editable parameter
    ///
    /// Compound values get the companion uniform `"Use" + uniform_name`;
    /// use `texture_bool` / `cube_map_bool` to pick another companion name.
    pub fn new(name: impl Into<String>, uniform_name: impl Into<String>, value: ParameterValue) -> Self {
        let uniform_name = uniform_name.into();
        let companion = value
            .kind()
            .is_compound()
            .then(|| CompanionUniform::new(format!("{}{}", VALIDITY_PREFIX, uniform_name)));
        Self {
            name: name.into(),
            uniform_name,
            editable: true,
            location: Cell::new(None),
            companion,
            value,
        }
    }

    pub fn bool(name: impl Into<String>, uniform_name: impl Into<String>, value: bool) -> Self {
        Self::new(name, uniform_name, value.into_value())
    }

    pub fn int(name: impl Into<String>, uniform_name: impl Into<String>, value: i32) -> Self {
        Self::new(name, uniform_name, value.into_value())
    }

    pub fn float(name: impl Into<String>, uniform_name: impl Into<String>, value: f32) -> Self {
        Self::new(name, uniform_name, value.into_value())
    }

    pub fn vector2(name: impl Into<String>, uniform_name: impl Into<String>, value: Vec2) -> Self {
        Self::new(name, uniform_name, value.into_value())
    }

    pub fn vector3(name: impl Into<String>, uniform_name: impl Into<String>, value: Vec3) -> Self {
        Self::new(name, uniform_name, value.into_value())
    }

    pub fn matrix3(name: impl Into<String>, uniform_name: impl Into<String>, value: Mat3) -> Self {
        Self::new(name, uniform_name, value.into_value())
    }

    pub fn matrix4(name: impl Into<String>, uniform_name: impl Into<String>, value: Mat4) -> Self {
        Self::new(name, uniform_name, value.into_value())
    }

    pub fn color(name: impl Into<String>, uniform_name: impl Into<String>, value: Color) -> Self {
        Self::new(name, uniform_name, value.into_value())
    }

    pub fn new_texture(
        name: impl Into<String>,
        uniform_name: impl Into<String>,
        texture: Option<Arc<dyn Texture>>,
    ) -> Self {
        Self::new(name, uniform_name, ParameterValue::Texture(texture))
    }

    /// Texture plus a companion boolean set to `texture.is_some()` on send
    pub fn texture_bool(
        name: impl Into<String>,
        uniform_name: impl Into<String>,
        validity_uniform_name: impl Into<String>,
        texture: Option<Arc<dyn Texture>>,
    ) -> Self {
        let mut parameter = Self::new(name, uniform_name, ParameterValue::TextureBool(texture));
        parameter.companion = Some(CompanionUniform::new(validity_uniform_name.into()));
        parameter
    }

    pub fn new_cube_map(
        name: impl Into<String>,
        uniform_name: impl Into<String>,
        cube_map: Option<Arc<dyn CubeMap>>,
    ) -> Self {
        Self::new(name, uniform_name, ParameterValue::CubeMap(cube_map))
    }

    /// Cube map plus a companion boolean set to `cube_map.is_some()` on send
    pub fn cube_map_bool(
        name: impl Into<String>,
        uniform_name: impl Into<String>,
        validity_uniform_name: impl Into<String>,
        cube_map: Option<Arc<dyn CubeMap>>,
    ) -> Self {
        let mut parameter = Self::new(name, uniform_name, ParameterValue::CubeMapBool(cube_map));
        parameter.companion = Some(CompanionUniform::new(validity_uniform_name.into()));
        parameter
    }

    /// Builder form of `set_editable`
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    // ===== IDENTITY =====

    /// Material-local key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shader-side symbol
    pub fn uniform_name(&self) -> &str {
        &self.uniform_name
    }

    /// Companion boolean symbol (compound kinds only)
    pub fn validity_uniform_name(&self) -> Option<&str> {
        self.companion.as_ref().map(|c| c.uniform_name.as_str())
    }

    /// Shown by `Material::to_editor`
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn kind(&self) -> ParameterKind {
        self.value.kind()
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    // ===== TYPED VALUE ACCESS =====

    /// Value as `T`, `None` if the parameter holds another kind
    pub fn get<T: ParameterType>(&self) -> Option<T> {
        T::extract(&self.value)
    }

    /// Overwrite the value, clamped to the parameter's range
    pub fn set<T: ParameterType>(&mut self, value: T) -> Result<()> {
        if T::store(&mut self.value, value) {
            Ok(())
        } else {
            Err(self.mismatch(T::KIND))
        }
    }

    fn mismatch(&self, expected: ParameterKind) -> Error {
        Error::TypeMismatch {
            name: self.name.clone(),
            expected,
            found: self.kind(),
        }
    }

    /// Range of an Int parameter
    pub fn int_range(&self) -> Option<NumericRange<i32>> {
        match &self.value {
            ParameterValue::Int { range, .. } => Some(*range),
            _ => None,
        }
    }

    /// Range of a Float, Vector2 or Vector3 parameter
    pub fn float_range(&self) -> Option<NumericRange<f32>> {
        match &self.value {
            ParameterValue::Float { range, .. }
            | ParameterValue::Vector2 { range, .. }
            | ParameterValue::Vector3 { range, .. } => Some(*range),
            _ => None,
        }
    }

    /// Replace the range of an Int parameter and re-clamp its value
    pub fn set_int_range(&mut self, new_range: NumericRange<i32>) -> Result<()> {
        new_range.validate().map_err(|msg| {
            Error::InvalidParameter(format!("Parameter '{}': {}", self.name, msg))
        })?;
        if self.kind() != ParameterKind::Int {
            return Err(self.mismatch(ParameterKind::Int));
        }
        if let ParameterValue::Int { range, .. } = &mut self.value {
            *range = new_range;
        }
        self.value.clamp_in_place();
        Ok(())
    }

    /// Replace the range of a Float, Vector2 or Vector3 parameter and re-clamp its value
    pub fn set_float_range(&mut self, new_range: NumericRange<f32>) -> Result<()> {
        new_range.validate().map_err(|msg| {
            Error::InvalidParameter(format!("Parameter '{}': {}", self.name, msg))
        })?;
        match &mut self.value {
            ParameterValue::Float { range, .. }
            | ParameterValue::Vector2 { range, .. }
            | ParameterValue::Vector3 { range, .. } => *range = new_range,
            other => {
                return Err(Error::TypeMismatch {
                    name: self.name.clone(),
                    expected: ParameterKind::Float,
                    found: other.kind(),
                })
            }
        }
        self.value.clamp_in_place();
        Ok(())
    }

    // ===== RESOURCE ACCESS =====

    /// Texture of a Texture or TextureBool parameter
    pub fn texture(&self) -> Option<&Arc<dyn Texture>> {
        match &self.value {
            ParameterValue::Texture(t) | ParameterValue::TextureBool(t) => t.as_ref(),
            _ => None,
        }
    }

    pub fn set_texture(&mut self, texture: Option<Arc<dyn Texture>>) -> Result<()> {
        match &mut self.value {
            ParameterValue::Texture(t) | ParameterValue::TextureBool(t) => {
                *t = texture;
                Ok(())
            }
            other => Err(Error::TypeMismatch {
                name: self.name.clone(),
                expected: ParameterKind::Texture,
                found: other.kind(),
            }),
        }
    }

    /// Cube map of a CubeMap or CubeMapBool parameter
    pub fn cube_map(&self) -> Option<&Arc<dyn CubeMap>> {
        match &self.value {
            ParameterValue::CubeMap(c) | ParameterValue::CubeMapBool(c) => c.as_ref(),
            _ => None,
        }
    }

    pub fn set_cube_map(&mut self, cube_map: Option<Arc<dyn CubeMap>>) -> Result<()> {
        match &mut self.value {
            ParameterValue::CubeMap(c) | ParameterValue::CubeMapBool(c) => {
                *c = cube_map;
                Ok(())
            }
            other => Err(Error::TypeMismatch {
                name: self.name.clone(),
                expected: ParameterKind::CubeMap,
                found: other.kind(),
            }),
        }
    }

    /// Derived validity of a compound parameter (resource present)
    pub fn is_valid(&self) -> Option<bool> {
        match &self.value {
            ParameterValue::TextureBool(t) => Some(t.is_some()),
            ParameterValue::CubeMapBool(c) => Some(c.is_some()),
            _ => None,
        }
    }

    // ===== LOCATION CACHE =====

    pub fn is_location_saved(&self) -> bool {
        self.location.get().is_some()
            && self.companion.as_ref().map_or(true, |c| c.location.get().is_some())
    }

    /// Cached primary location, if any
    pub fn saved_location(&self) -> Option<UniformLocation> {
        self.location.get().map(|(_, location)| location)
    }

    /// Cached companion location, if any
    pub fn saved_validity_location(&self) -> Option<UniformLocation> {
        self.companion
            .as_ref()
            .and_then(|c| c.location.get())
            .map(|(_, location)| location)
    }

    /// Query and cache every location this parameter writes to
    pub fn save_uniform_location(&self, shader: &dyn Shader) {
        let id = shader.id();
        self.location.set(Some((id, shader.uniform_location(&self.uniform_name))));
        if let Some(companion) = &self.companion {
            companion
                .location
                .set(Some((id, shader.uniform_location(&companion.uniform_name))));
        }
    }

    /// Forget cached locations
    pub fn discard_save(&self) {
        self.location.set(None);
        if let Some(companion) = &self.companion {
            companion.location.set(None);
        }
    }

    // ===== BINDING =====

    /// Write the value into the bound program
    ///
    /// Texture-bearing kinds claim `ctx.texture_unit`, select it, bind the
    /// resource (or unbind when absent), point the sampler at it, and return
    /// the context advanced by one unit. The companion boolean never
    /// consumes a unit. Invalid locations are written through silently.
    pub fn send_to_shader(&self, shader: &dyn Shader, ctx: BindingContext) -> BindingContext {
        let mut ctx = ctx;
        let location = resolve_location(&self.location, shader, &self.uniform_name);

        match &self.value {
            ParameterValue::Bool(v) => shader.set_bool(location, *v),
            ParameterValue::Int { value, .. } => shader.set_int(location, *value),
            ParameterValue::Float { value, .. } => shader.set_float(location, *value),
            ParameterValue::Vector2 { value, .. } => shader.set_vector2(location, *value),
            ParameterValue::Vector3 { value, .. } => shader.set_vector3(location, *value),
            ParameterValue::Matrix3(m) => shader.set_matrix3(location, m),
            ParameterValue::Matrix4(m) => shader.set_matrix4(location, m),
            ParameterValue::Color(c) => shader.set_color(location, *c),
            ParameterValue::Texture(t) | ParameterValue::TextureBool(t) => {
                let handle = t.as_ref().map(|t| t.handle());
                self.bind_sampler(shader, location, TextureTarget::Texture2D, handle, &mut ctx);
            }
            ParameterValue::CubeMap(c) | ParameterValue::CubeMapBool(c) => {
                let handle = c.as_ref().map(|c| c.handle());
                self.bind_sampler(shader, location, TextureTarget::CubeMap, handle, &mut ctx);
            }
        }

        if let Some(companion) = &self.companion {
            let valid = self.is_valid().unwrap_or(false);
            let location = resolve_location(&companion.location, shader, &companion.uniform_name);
            shader.set_bool(location, valid);
        }

        ctx
    }

    /// Release the unit claimed by `send_to_shader`
    ///
    /// Must replay the send order with the same starting context. Value kinds
    /// leave the context untouched.
    pub fn clean(&self, shader: &dyn Shader, ctx: BindingContext) -> BindingContext {
        let mut ctx = ctx;
        let target = match self.kind() {
            ParameterKind::Texture | ParameterKind::TextureBool => TextureTarget::Texture2D,
            ParameterKind::CubeMap | ParameterKind::CubeMapBool => TextureTarget::CubeMap,
            _ => return ctx,
        };
        if let Some(unit) = ctx.claim_texture_unit() {
            shader.set_active_texture_unit(unit);
            shader.bind_texture(target, None);
        }
        ctx
    }

    /// Unit selection strictly before bind, bind before sampler write
    ///
    /// With no unit left nothing is bound and the sampler is left untouched.
    fn bind_sampler(
        &self,
        shader: &dyn Shader,
        location: UniformLocation,
        target: TextureTarget,
        handle: Option<TextureHandle>,
        ctx: &mut BindingContext,
    ) {
        let Some(unit) = ctx.claim_texture_unit() else {
            engine_warn!(SOURCE, "Parameter '{}': no texture unit left, not bound", self.name);
            return;
        };
        shader.set_active_texture_unit(unit);
        shader.bind_texture(target, handle);
        shader.set_int(location, unit as i32);
    }

    // ===== EDITOR =====

    /// Show the parameter in an editor, returns `true` if the value changed
    pub fn to_editor(&mut self, editor: &mut dyn ParameterEditor) -> bool {
        let label = self.name.as_str();
        let changed = match &mut self.value {
            ParameterValue::Bool(v) => editor.edit_bool(label, v),
            ParameterValue::Int { value, range } => editor.edit_int(label, value, range),
            ParameterValue::Float { value, range } => editor.edit_float(label, value, range),
            ParameterValue::Vector2 { value, range } => editor.edit_vector2(label, value, range),
            ParameterValue::Vector3 { value, range } => editor.edit_vector3(label, value, range),
            ParameterValue::Matrix3(m) => editor.edit_matrix3(label, m),
            ParameterValue::Matrix4(m) => editor.edit_matrix4(label, m),
            ParameterValue::Color(c) => editor.edit_color(label, c),
            ParameterValue::Texture(t) | ParameterValue::TextureBool(t) => {
                editor.show_texture(label, t.as_deref());
                false
            }
            ParameterValue::CubeMap(c) | ParameterValue::CubeMapBool(c) => {
                editor.show_cube_map(label, c.as_deref());
                false
            }
        };
        if changed {
            self.value.clamp_in_place();
        }
        changed
    }
}

/// Clones start uncached: locations belong to the program they came from
impl Clone for Parameter {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            uniform_name: self.uniform_name.clone(),
            editable: self.editable,
            location: Cell::new(None),
            companion: self
                .companion
                .as_ref()
                .map(|c| CompanionUniform::new(c.uniform_name.clone())),
            value: self.value.clone(),
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("uniform_name", &self.uniform_name)
            .field("validity_uniform_name", &self.validity_uniform_name())
            .field("editable", &self.editable)
            .field("location", &self.saved_location())
            .field("value", &self.value)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
