/// Material: named parameters pushed into a shader at draw time.
///
/// A Material maps parameter names to parameters and references (never owns)
/// a shader and an optional shadow map. Each parameter slot is either owned
/// by the material or shared with other materials (a prototype parameter
/// several materials point at). Dropping a material drops its owned slots
/// and only releases its handle on shared ones.
///
/// Parameters are kept in insertion order, which fixes the texture unit each
/// texture-bearing parameter receives during `send_parameters_to_shader`.
///
/// Cloning is deep: every slot of the clone is owned, including slots that
/// were shared in the source. Shader and shadow map references are copied.
///
/// A shared parameter follows `RefCell` rules. Binding passes skip it, with a
/// warning, while another holder keeps a `ParameterRefMut` on it. Lookups,
/// insertion, editing and cloning panic in that situation instead.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::sync::Arc;
use rustc_hash::{FxHashMap, FxHashSet};
use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::error::{Error, Result};
use crate::graphics::{
    BindingContext, CubeMap, Shader, ShadowMap, Texture, TextureTarget,
};
use crate::material::{
    Color, DefaultParameter, Parameter, ParameterEditor, ParameterKind, ParameterType,
};
use crate::{engine_bail, engine_debug, engine_trace, engine_warn};

const SOURCE: &str = "galaxy3d::Material";

// ===== PARAMETER SLOTS =====

/// Parameter shared between several materials
pub type SharedParameter = Rc<RefCell<Parameter>>;

/// Wrap a parameter for sharing
pub fn share_parameter(parameter: Parameter) -> SharedParameter {
    Rc::new(RefCell::new(parameter))
}

/// Ownership-tagged storage for one parameter
pub enum ParameterSlot {
    /// Dropped with the material
    Owned(Box<Parameter>),
    /// Kept alive by its other holders
    Shared(SharedParameter),
}

impl ParameterSlot {
    pub fn is_owned(&self) -> bool {
        matches!(self, ParameterSlot::Owned(_))
    }

    /// # Panics
    ///
    /// If the slot is shared and mutably borrowed elsewhere.
    pub fn borrow(&self) -> ParameterRef<'_> {
        match self {
            ParameterSlot::Owned(p) => ParameterRef::Owned(p),
            ParameterSlot::Shared(p) => ParameterRef::Shared(p.borrow()),
        }
    }

    /// # Panics
    ///
    /// If the slot is shared and borrowed elsewhere.
    pub fn borrow_mut(&mut self) -> ParameterRefMut<'_> {
        match self {
            ParameterSlot::Owned(p) => ParameterRefMut::Owned(p),
            ParameterSlot::Shared(p) => ParameterRefMut::Shared(p.borrow_mut()),
        }
    }

    /// Read access, `None` while a shared parameter is mutably borrowed elsewhere
    pub fn try_borrow(&self) -> Option<ParameterRef<'_>> {
        match self {
            ParameterSlot::Owned(p) => Some(ParameterRef::Owned(p)),
            ParameterSlot::Shared(p) => p.try_borrow().ok().map(ParameterRef::Shared),
        }
    }

    /// Owned copy of the parameter, whatever this slot's ownership
    fn deep_clone(&self) -> ParameterSlot {
        ParameterSlot::Owned(Box::new(self.borrow().clone()))
    }
}

impl From<Parameter> for ParameterSlot {
    fn from(parameter: Parameter) -> Self {
        ParameterSlot::Owned(Box::new(parameter))
    }
}

impl From<SharedParameter> for ParameterSlot {
    fn from(parameter: SharedParameter) -> Self {
        ParameterSlot::Shared(parameter)
    }
}

/// Read access to a parameter, owned or shared
pub enum ParameterRef<'a> {
    Owned(&'a Parameter),
    Shared(Ref<'a, Parameter>),
}

impl Deref for ParameterRef<'_> {
    type Target = Parameter;

    fn deref(&self) -> &Parameter {
        match self {
            ParameterRef::Owned(p) => p,
            ParameterRef::Shared(p) => p,
        }
    }
}

/// Write access to a parameter, owned or shared
///
/// Writing through a shared parameter is visible to every material holding it.
pub enum ParameterRefMut<'a> {
    Owned(&'a mut Parameter),
    Shared(RefMut<'a, Parameter>),
}

impl Deref for ParameterRefMut<'_> {
    type Target = Parameter;

    fn deref(&self) -> &Parameter {
        match self {
            ParameterRefMut::Owned(p) => p,
            ParameterRefMut::Shared(p) => p,
        }
    }
}

impl DerefMut for ParameterRefMut<'_> {
    fn deref_mut(&mut self) -> &mut Parameter {
        match self {
            ParameterRefMut::Owned(p) => p,
            ParameterRefMut::Shared(p) => p,
        }
    }
}

// ===== DESCRIPTOR =====

/// Material creation descriptor
#[derive(Default)]
pub struct MaterialDesc {
    pub name: String,
    pub shader: Option<Rc<dyn Shader>>,
    pub shadow_map: Option<Arc<dyn ShadowMap>>,
    pub is_instance: bool,
    pub needs_lights: bool,
    pub needs_camera: bool,
    /// Parameters owned by the material
    pub parameters: Vec<Parameter>,
    /// Parameters shared with other materials (inserted after `parameters`)
    pub shared_parameters: Vec<SharedParameter>,
}

// ===== MATERIAL =====

pub struct Material {
    name: String,
    slots: Vec<(String, ParameterSlot)>,
    slot_names: FxHashMap<String, usize>,
    shader: Option<Rc<dyn Shader>>,
    shadow_map: Option<Arc<dyn ShadowMap>>,
    is_instance: bool,
    needs_lights: bool,
    needs_camera: bool,
}

impl Material {
    /// Create an empty material with no shader
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            slot_names: FxHashMap::default(),
            shader: None,
            shadow_map: None,
            is_instance: false,
            needs_lights: false,
            needs_camera: false,
        }
    }

    /// Create a material from a descriptor
    ///
    /// Rejects empty parameter names and names used twice (across owned and
    /// shared parameters).
    pub fn from_desc(desc: MaterialDesc) -> Result<Self> {
        // ========== VALIDATION: names ==========
        let mut seen_names = FxHashSet::default();
        let shared_names: Vec<String> = desc
            .shared_parameters
            .iter()
            .map(|p| p.borrow().name().to_string())
            .collect();
        let all_names = desc
            .parameters
            .iter()
            .map(|p| p.name())
            .chain(shared_names.iter().map(String::as_str));

        for name in all_names {
            if name.is_empty() {
                engine_bail!(SOURCE, "Material '{}': parameter name must not be empty", desc.name);
            }
            if !seen_names.insert(name.to_string()) {
                engine_bail!(SOURCE, "Material '{}': duplicate parameter name '{}'", desc.name, name);
            }
        }

        // ========== BUILD ==========
        let mut material = Material::new(desc.name);
        material.shader = desc.shader;
        material.shadow_map = desc.shadow_map;
        material.is_instance = desc.is_instance;
        material.needs_lights = desc.needs_lights;
        material.needs_camera = desc.needs_camera;

        for parameter in desc.parameters {
            material.push_slot(parameter.name().to_string(), parameter.into());
        }
        for (name, parameter) in shared_names.into_iter().zip(desc.shared_parameters) {
            material.push_slot(name, parameter.into());
        }

        Ok(material)
    }

    /// Deep clone flagged as an instance
    pub fn create_instance(&self) -> Material {
        let mut instance = self.clone();
        instance.is_instance = true;
        instance
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== INSERTION / REMOVAL =====

    fn push_slot(&mut self, name: String, slot: ParameterSlot) {
        self.slot_names.insert(name.clone(), self.slots.len());
        self.slots.push((name, slot));
    }

    /// Insert a parameter, replacing any parameter with the same name
    ///
    /// The previous parameter is removed first (dropped if owned), then the
    /// new one is appended. Returns `true` if a parameter was replaced.
    pub fn add_parameter(&mut self, parameter: impl Into<ParameterSlot>) -> bool {
        let slot = parameter.into();
        let name = slot.borrow().name().to_string();
        let replaced = self.remove_parameter(&name);
        if replaced {
            engine_debug!(SOURCE, "Material '{}': replaced parameter '{}'", self.name, name);
        }
        self.push_slot(name, slot);
        replaced
    }

    /// Insert a parameter shared with other materials
    pub fn add_shared_parameter(&mut self, parameter: SharedParameter) -> bool {
        self.add_parameter(parameter)
    }

    /// Insert an owned parameter and return it for further setup
    pub fn add_owned_parameter(&mut self, parameter: Parameter) -> &mut Parameter {
        self.add_parameter(parameter);
        match self.slots.last_mut() {
            Some((_, ParameterSlot::Owned(p))) => p,
            _ => unreachable!("owned parameter was just pushed"),
        }
    }

    /// Remove a parameter by name, returns `true` if it existed
    pub fn remove_parameter(&mut self, name: &str) -> bool {
        let Some(index) = self.slot_names.remove(name) else {
            return false;
        };
        let (_, slot) = self.slots.remove(index);
        for i in self.slot_names.values_mut() {
            if *i > index {
                *i -= 1;
            }
        }
        engine_trace!(
            SOURCE,
            "Material '{}': removed {} parameter '{}'",
            self.name,
            if slot.is_owned() { "owned" } else { "shared" },
            name
        );
        true
    }

    /// Remove every parameter
    pub fn remove_all_parameters(&mut self) {
        self.slots.clear();
        self.slot_names.clear();
    }

    // ===== FACTORIES =====

    pub fn add_bool_parameter(&mut self, name: &str, uniform_name: &str, value: bool) -> &mut Parameter {
        self.add_owned_parameter(Parameter::bool(name, uniform_name, value))
    }

    pub fn add_int_parameter(&mut self, name: &str, uniform_name: &str, value: i32) -> &mut Parameter {
        self.add_owned_parameter(Parameter::int(name, uniform_name, value))
    }

    pub fn add_float_parameter(&mut self, name: &str, uniform_name: &str, value: f32) -> &mut Parameter {
        self.add_owned_parameter(Parameter::float(name, uniform_name, value))
    }

    pub fn add_vector2_parameter(&mut self, name: &str, uniform_name: &str, value: Vec2) -> &mut Parameter {
        self.add_owned_parameter(Parameter::vector2(name, uniform_name, value))
    }

    pub fn add_vector3_parameter(&mut self, name: &str, uniform_name: &str, value: Vec3) -> &mut Parameter {
        self.add_owned_parameter(Parameter::vector3(name, uniform_name, value))
    }

    pub fn add_matrix3_parameter(&mut self, name: &str, uniform_name: &str, value: Mat3) -> &mut Parameter {
        self.add_owned_parameter(Parameter::matrix3(name, uniform_name, value))
    }

    pub fn add_matrix4_parameter(&mut self, name: &str, uniform_name: &str, value: Mat4) -> &mut Parameter {
        self.add_owned_parameter(Parameter::matrix4(name, uniform_name, value))
    }

    pub fn add_color_parameter(&mut self, name: &str, uniform_name: &str, value: Color) -> &mut Parameter {
        self.add_owned_parameter(Parameter::color(name, uniform_name, value))
    }

    pub fn add_texture_parameter(
        &mut self,
        name: &str,
        uniform_name: &str,
        texture: Option<Arc<dyn Texture>>,
    ) -> &mut Parameter {
        self.add_owned_parameter(Parameter::new_texture(name, uniform_name, texture))
    }

    pub fn add_texture_bool_parameter(
        &mut self,
        name: &str,
        uniform_name: &str,
        validity_uniform_name: &str,
        texture: Option<Arc<dyn Texture>>,
    ) -> &mut Parameter {
        self.add_owned_parameter(Parameter::texture_bool(
            name,
            uniform_name,
            validity_uniform_name,
            texture,
        ))
    }

    pub fn add_cube_map_parameter(
        &mut self,
        name: &str,
        uniform_name: &str,
        cube_map: Option<Arc<dyn CubeMap>>,
    ) -> &mut Parameter {
        self.add_owned_parameter(Parameter::new_cube_map(name, uniform_name, cube_map))
    }

    pub fn add_cube_map_bool_parameter(
        &mut self,
        name: &str,
        uniform_name: &str,
        validity_uniform_name: &str,
        cube_map: Option<Arc<dyn CubeMap>>,
    ) -> &mut Parameter {
        self.add_owned_parameter(Parameter::cube_map_bool(
            name,
            uniform_name,
            validity_uniform_name,
            cube_map,
        ))
    }

    /// Add a value parameter for a registry role (name = uniform = canonical name)
    pub fn add_default_parameter<T: ParameterType>(
        &mut self,
        role: DefaultParameter,
        value: T,
    ) -> Result<&mut Parameter> {
        if role.kind() != T::KIND {
            return Err(Error::TypeMismatch {
                name: role.name().to_string(),
                expected: role.kind(),
                found: T::KIND,
            });
        }
        Ok(self.add_owned_parameter(Parameter::new(role.name(), role.name(), value.into_value())))
    }

    /// Add a TextureBool parameter for a texture role, with its registry companion
    pub fn add_default_texture_parameter(
        &mut self,
        role: DefaultParameter,
        texture: Option<Arc<dyn Texture>>,
    ) -> Result<&mut Parameter> {
        let validity = Self::role_validity_name(role, ParameterKind::TextureBool)?;
        Ok(self.add_texture_bool_parameter(role.name(), role.name(), validity, texture))
    }

    /// Add a CubeMapBool parameter for a cube map role, with its registry companion
    pub fn add_default_cube_map_parameter(
        &mut self,
        role: DefaultParameter,
        cube_map: Option<Arc<dyn CubeMap>>,
    ) -> Result<&mut Parameter> {
        let validity = Self::role_validity_name(role, ParameterKind::CubeMapBool)?;
        Ok(self.add_cube_map_bool_parameter(role.name(), role.name(), validity, cube_map))
    }

    fn role_validity_name(role: DefaultParameter, expected: ParameterKind) -> Result<&'static str> {
        match role.validity_name() {
            Some(validity) if role.kind() == expected => Ok(validity),
            _ => Err(Error::TypeMismatch {
                name: role.name().to_string(),
                expected: role.kind(),
                found: expected,
            }),
        }
    }

    // ===== LOOKUP =====

    pub fn contains_parameter(&self, name: &str) -> bool {
        self.slot_names.contains_key(name)
    }

    pub fn parameter_count(&self) -> usize {
        self.slots.len()
    }

    /// Parameter names in insertion order
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    /// `Some(true)` if the material owns the parameter, `Some(false)` if shared
    pub fn is_owned(&self, name: &str) -> Option<bool> {
        let index = self.slot_names.get(name)?;
        Some(self.slots[*index].1.is_owned())
    }

    /// Parameters that consume a texture unit when sent
    pub fn texture_parameter_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.borrow().kind().is_texture_bearing())
            .count()
    }

    pub fn get_parameter(&self, name: &str) -> Option<ParameterRef<'_>> {
        let index = self.slot_names.get(name)?;
        Some(self.slots[*index].1.borrow())
    }

    pub fn get_parameter_mut(&mut self, name: &str) -> Option<ParameterRefMut<'_>> {
        let index = *self.slot_names.get(name)?;
        Some(self.slots[index].1.borrow_mut())
    }

    /// Lookup by role, through the role's canonical name
    pub fn get_default_parameter(&self, role: DefaultParameter) -> Option<ParameterRef<'_>> {
        self.get_parameter(role.name())
    }

    pub fn get_default_parameter_mut(&mut self, role: DefaultParameter) -> Option<ParameterRefMut<'_>> {
        self.get_parameter_mut(role.name())
    }

    /// Checked lookup: `None` if absent or of another kind
    pub fn get_parameter_of_kind(&self, name: &str, kind: ParameterKind) -> Option<ParameterRef<'_>> {
        self.get_parameter(name).filter(|p| p.kind() == kind)
    }

    /// Typed value, `None` if absent or of another kind
    pub fn get_value<T: ParameterType>(&self, name: &str) -> Option<T> {
        self.get_parameter(name)?.get::<T>()
    }

    pub fn get_default_value<T: ParameterType>(&self, role: DefaultParameter) -> Option<T> {
        self.get_value(role.name())
    }

    /// Overwrite a typed value (clamped to the parameter's range)
    pub fn set_value<T: ParameterType>(&mut self, name: &str, value: T) -> Result<()> {
        let mut parameter = self
            .get_parameter_mut(name)
            .ok_or_else(|| Error::ParameterNotFound(name.to_string()))?;
        parameter.set(value)
    }

    pub fn set_default_value<T: ParameterType>(&mut self, role: DefaultParameter, value: T) -> Result<()> {
        self.set_value(role.name(), value)
    }

    // ===== SHADER / SHADOW MAP REFERENCES =====

    pub fn set_shader(&mut self, shader: Option<Rc<dyn Shader>>) {
        self.shader = shader;
    }

    pub fn shader(&self) -> Option<&Rc<dyn Shader>> {
        self.shader.as_ref()
    }

    pub fn has_shader(&self) -> bool {
        self.shader.is_some()
    }

    pub fn set_shadow_map(&mut self, shadow_map: Option<Arc<dyn ShadowMap>>) {
        self.shadow_map = shadow_map;
    }

    pub fn shadow_map(&self) -> Option<&Arc<dyn ShadowMap>> {
        self.shadow_map.as_ref()
    }

    pub fn has_shadow_map(&self) -> bool {
        self.shadow_map.is_some()
    }

    // ===== RENDERER FLAGS =====

    /// Deep clone of another material
    pub fn is_instance(&self) -> bool {
        self.is_instance
    }

    /// The renderer must also send light data
    pub fn needs_lights(&self) -> bool {
        self.needs_lights
    }

    pub fn set_needs_lights(&mut self, needs_lights: bool) {
        self.needs_lights = needs_lights;
    }

    /// The renderer must also send camera data
    pub fn needs_camera(&self) -> bool {
        self.needs_camera
    }

    pub fn set_needs_camera(&mut self, needs_camera: bool) {
        self.needs_camera = needs_camera;
    }

    // ===== BINDING =====

    /// Send every parameter, in insertion order, to the bound `shader`
    ///
    /// A shared parameter being edited elsewhere is skipped and claims no unit.
    pub fn send_parameters_to_shader(&self, shader: &dyn Shader, ctx: BindingContext) -> BindingContext {
        self.slots.iter().fold(ctx, |ctx, (name, slot)| match slot.try_borrow() {
            Some(parameter) => parameter.send_to_shader(shader, ctx),
            None => {
                self.warn_busy_parameter(name, "send");
                ctx
            }
        })
    }

    /// Release texture units, replaying the send order from the same start context
    pub fn clean(&self, shader: &dyn Shader, ctx: BindingContext) -> BindingContext {
        self.slots.iter().fold(ctx, |ctx, (name, slot)| match slot.try_borrow() {
            Some(parameter) => parameter.clean(shader, ctx),
            None => {
                self.warn_busy_parameter(name, "clean");
                ctx
            }
        })
    }

    fn warn_busy_parameter(&self, name: &str, pass: &str) {
        engine_warn!(
            SOURCE,
            "Material '{}': shared parameter '{}' is borrowed for writing, skipped by {}",
            self.name,
            name,
            pass
        );
    }

    /// Cache every parameter's locations against the material's shader
    ///
    /// No-op without a shader.
    pub fn save_uniforms_location(&self) {
        let Some(shader) = &self.shader else {
            return;
        };
        for (name, slot) in &self.slots {
            match slot.try_borrow() {
                Some(parameter) => parameter.save_uniform_location(shader.as_ref()),
                None => self.warn_busy_parameter(name, "save"),
            }
        }
        engine_trace!(SOURCE, "Material '{}': saved {} uniform locations", self.name, self.slots.len());
    }

    /// Forget every cached location (call after recompiling the shader)
    ///
    /// No-op without a shader.
    pub fn discard_saved_uniforms_location(&self) {
        if self.shader.is_none() {
            return;
        }
        for (name, slot) in &self.slots {
            match slot.try_borrow() {
                Some(parameter) => parameter.discard_save(),
                None => self.warn_busy_parameter(name, "discard"),
            }
        }
        engine_trace!(SOURCE, "Material '{}': discarded saved uniform locations", self.name);
    }

    /// Bind the shadow map to the next texture unit and describe it
    ///
    /// Writes `ShadowMap` (sampler), `ShadowMatrix` and `UseShadowMap`.
    /// Without a shadow map only `UseShadowMap = false` is written and no
    /// unit is consumed.
    pub fn send_shadow_map_to_shader(&self, shader: &dyn Shader, ctx: BindingContext) -> BindingContext {
        let mut ctx = ctx;
        let role = DefaultParameter::ShadowMap;
        let validity = role.validity_name().unwrap_or_default();
        let validity_location = shader.uniform_location(validity);

        let Some(shadow_map) = &self.shadow_map else {
            shader.set_bool(validity_location, false);
            return ctx;
        };

        let Some(unit) = ctx.claim_texture_unit() else {
            engine_warn!(SOURCE, "Material '{}': no texture unit left for the shadow map", self.name);
            shader.set_bool(validity_location, false);
            return ctx;
        };
        shader.set_active_texture_unit(unit);
        shader.bind_texture(TextureTarget::Texture2D, Some(shadow_map.depth_texture()));
        shader.set_int(shader.uniform_location(role.name()), unit as i32);
        shader.set_matrix4(
            shader.uniform_location(DefaultParameter::ShadowMatrix.name()),
            &shadow_map.light_space_matrix(),
        );
        shader.set_bool(validity_location, true);
        ctx
    }

    /// Release the unit claimed by `send_shadow_map_to_shader`
    pub fn clean_shadow_map(&self, shader: &dyn Shader, ctx: BindingContext) -> BindingContext {
        let mut ctx = ctx;
        if self.shadow_map.is_some() {
            if let Some(unit) = ctx.claim_texture_unit() {
                shader.set_active_texture_unit(unit);
                shader.bind_texture(TextureTarget::Texture2D, None);
            }
        }
        ctx
    }

    /// Full draw-call sequence against the material's own shader
    ///
    /// bind, send parameters, send shadow map, `draw`, clean both, unbind.
    /// Returns the context after the send pass.
    pub fn draw_with<F>(&self, ctx: BindingContext, draw: F) -> Result<BindingContext>
    where
        F: FnOnce(&dyn Shader),
    {
        let Some(shader) = &self.shader else {
            engine_bail!(SOURCE, "Material '{}' has no shader to draw with", self.name);
        };
        let shader = shader.as_ref();

        shader.bind();
        let sent = self.send_parameters_to_shader(shader, ctx);
        let sent = self.send_shadow_map_to_shader(shader, sent);

        draw(shader);

        let cleaned = self.clean(shader, ctx);
        self.clean_shadow_map(shader, cleaned);
        shader.unbind();

        Ok(sent)
    }

    // ===== EDITOR =====

    /// Show editable parameters, returns `true` if any value changed
    pub fn to_editor(&mut self, editor: &mut dyn ParameterEditor) -> bool {
        editor.begin_material(&self.name);
        let mut changed = false;
        for (_, slot) in &mut self.slots {
            let mut parameter = slot.borrow_mut();
            if parameter.is_editable() {
                changed |= parameter.to_editor(editor);
            }
        }
        editor.end_material();
        changed
    }
}

/// Deep clone: every parameter is copied into an owned slot
impl Clone for Material {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            slots: self
                .slots
                .iter()
                .map(|(name, slot)| (name.clone(), slot.deep_clone()))
                .collect(),
            slot_names: self.slot_names.clone(),
            shader: self.shader.clone(),
            shadow_map: self.shadow_map.clone(),
            is_instance: self.is_instance,
            needs_lights: self.needs_lights,
            needs_camera: self.needs_camera,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
