/// Mock graphics layer for unit tests (no GPU required)
///
/// MockShader behaves like a linked program with a fixed set of active
/// uniforms: it hands out locations, stores the last value written to each
/// valid location, and records every call in order so tests can check the
/// binding protocol.

use std::cell::{Cell, RefCell};
use glam::{Mat3, Mat4, Vec2, Vec3};
use rustc_hash::FxHashMap;
use crate::graphics::{
    Shader, ShaderId, UniformLocation, UniformLocationCache, TextureTarget,
    Texture, CubeMap, ShadowMap, TextureHandle,
};
use crate::material::Color;

// ============================================================================
// Recorded calls
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MockValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vector2(Vec2),
    Vector3(Vec3),
    Color(Color),
    Matrix3(Mat3),
    Matrix4(Mat4),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Bind,
    Unbind,
    Set(UniformLocation, MockValue),
    ActiveTexture(u32),
    BindTexture(TextureTarget, Option<TextureHandle>),
}

// ============================================================================
// Mock Shader
// ============================================================================

pub struct MockShader {
    id: ShaderId,
    active_uniforms: RefCell<FxHashMap<String, i32>>,
    cache: UniformLocationCache,
    program_queries: Cell<usize>,
    values: RefCell<FxHashMap<i32, MockValue>>,
    calls: RefCell<Vec<MockCall>>,
}

impl MockShader {
    /// Program exposing `uniforms`, located 0, 1, 2... in order
    pub fn new(uniforms: &[&str]) -> Self {
        Self {
            id: ShaderId::next(),
            active_uniforms: RefCell::new(Self::assign_locations(uniforms, 0)),
            cache: UniformLocationCache::new(),
            program_queries: Cell::new(0),
            values: RefCell::new(FxHashMap::default()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn assign_locations(uniforms: &[&str], first: i32) -> FxHashMap<String, i32> {
        uniforms
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), first + i as i32))
            .collect()
    }

    /// Simulate a relink: new locations (starting at `first`), cache invalidated
    pub fn recompile(&self, uniforms: &[&str], first: i32) {
        *self.active_uniforms.borrow_mut() = Self::assign_locations(uniforms, first);
        self.values.borrow_mut().clear();
        self.cache.invalidate();
    }

    /// Location the program gives `name`, bypassing the cache
    pub fn location_of(&self, name: &str) -> UniformLocation {
        self.active_uniforms
            .borrow()
            .get(name)
            .map(|l| UniformLocation(*l))
            .unwrap_or(UniformLocation::INVALID)
    }

    /// Last value written to the uniform `name`
    pub fn value_of(&self, name: &str) -> Option<MockValue> {
        let location = self.location_of(name);
        self.values.borrow().get(&location.0).cloned()
    }

    /// Number of queries that reached the program (cache misses)
    pub fn program_queries(&self) -> usize {
        self.program_queries.get()
    }

    pub fn cache(&self) -> &UniformLocationCache {
        &self.cache
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Number of uniform values currently stored
    pub fn stored_value_count(&self) -> usize {
        self.values.borrow().len()
    }

    fn record_set(&self, location: UniformLocation, value: MockValue) {
        self.calls.borrow_mut().push(MockCall::Set(location, value.clone()));
        if location.is_valid() {
            self.values.borrow_mut().insert(location.0, value);
        }
    }
}

impl Shader for MockShader {
    fn id(&self) -> ShaderId {
        self.id
    }

    fn bind(&self) {
        self.calls.borrow_mut().push(MockCall::Bind);
    }

    fn unbind(&self) {
        self.calls.borrow_mut().push(MockCall::Unbind);
    }

    fn uniform_location(&self, name: &str) -> UniformLocation {
        self.cache.get_or_query(name, |name| {
            self.program_queries.set(self.program_queries.get() + 1);
            self.location_of(name)
        })
    }

    fn set_bool(&self, location: UniformLocation, value: bool) {
        self.record_set(location, MockValue::Bool(value));
    }

    fn set_int(&self, location: UniformLocation, value: i32) {
        self.record_set(location, MockValue::Int(value));
    }

    fn set_float(&self, location: UniformLocation, value: f32) {
        self.record_set(location, MockValue::Float(value));
    }

    fn set_vector2(&self, location: UniformLocation, value: Vec2) {
        self.record_set(location, MockValue::Vector2(value));
    }

    fn set_vector3(&self, location: UniformLocation, value: Vec3) {
        self.record_set(location, MockValue::Vector3(value));
    }

    fn set_color(&self, location: UniformLocation, value: Color) {
        self.record_set(location, MockValue::Color(value));
    }

    fn set_matrix3(&self, location: UniformLocation, value: &Mat3) {
        self.record_set(location, MockValue::Matrix3(*value));
    }

    fn set_matrix4(&self, location: UniformLocation, value: &Mat4) {
        self.record_set(location, MockValue::Matrix4(*value));
    }

    fn set_active_texture_unit(&self, unit: u32) {
        self.calls.borrow_mut().push(MockCall::ActiveTexture(unit));
    }

    fn bind_texture(&self, target: TextureTarget, texture: Option<TextureHandle>) {
        self.calls.borrow_mut().push(MockCall::BindTexture(target, texture));
    }
}

// ============================================================================
// Mock Texture / CubeMap / ShadowMap
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub handle: u32,
    pub width: u32,
    pub height: u32,
}

impl MockTexture {
    pub fn new(handle: u32, width: u32, height: u32) -> Self {
        Self { handle, width, height }
    }
}

impl Texture for MockTexture {
    fn handle(&self) -> TextureHandle {
        TextureHandle(self.handle)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug)]
pub struct MockCubeMap {
    pub handle: u32,
    pub face_size: u32,
}

impl MockCubeMap {
    pub fn new(handle: u32, face_size: u32) -> Self {
        Self { handle, face_size }
    }
}

impl CubeMap for MockCubeMap {
    fn handle(&self) -> TextureHandle {
        TextureHandle(self.handle)
    }

    fn face_size(&self) -> u32 {
        self.face_size
    }
}

#[derive(Debug)]
pub struct MockShadowMap {
    pub handle: u32,
    pub size: u32,
    pub light_space: Mat4,
}

impl MockShadowMap {
    pub fn new(handle: u32, size: u32, light_space: Mat4) -> Self {
        Self { handle, size, light_space }
    }
}

impl ShadowMap for MockShadowMap {
    fn depth_texture(&self) -> TextureHandle {
        TextureHandle(self.handle)
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
