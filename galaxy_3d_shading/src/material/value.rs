/// Parameter value types
///
/// ParameterValue is the closed set of values a material parameter can hold.
/// Scalars and vectors carry an optional NumericRange used for clamping and
/// by the editor. Texture-bearing variants hold shared references to
/// resources owned elsewhere.

use std::fmt;
use std::sync::Arc;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::graphics::{Texture, CubeMap};

// ===== COLOR =====

/// Linear RGBA color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

// SAFETY: repr(C), four f32 fields, no padding
unsafe impl bytemuck::Zeroable for Color {}
unsafe impl bytemuck::Pod for Color {}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Components as `[r, g, b, a]`
    pub fn to_array(self) -> [f32; 4] {
        bytemuck::cast(self)
    }

    /// Every component clamped to [0, 1]
    pub fn saturate(self) -> Self {
        Self::rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        bytemuck::cast(c)
    }
}

impl From<[f32; 3]> for Color {
    fn from(c: [f32; 3]) -> Self {
        Color::rgb(c[0], c[1], c[2])
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Color::rgba(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

// ===== NUMERIC RANGE =====

/// Optional bounds and editor step for numeric parameters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericRange<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub step: Option<T>,
}

impl<T: Copy + PartialOrd + Default + fmt::Debug> NumericRange<T> {
    /// No bounds, no step
    pub fn unbounded() -> Self {
        Self { min: None, max: None, step: None }
    }

    /// Closed interval [min, max]
    pub fn between(min: T, max: T) -> Self {
        Self { min: Some(min), max: Some(max), step: None }
    }

    pub fn with_step(mut self, step: T) -> Self {
        self.step = Some(step);
        self
    }

    /// Whether either bound is set
    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Clamp `value` to the bounds that are set
    ///
    /// An unordered value (NaN) falls back to `min`, or to `max` when only
    /// the upper bound is set.
    pub fn clamp(&self, value: T) -> T {
        let mut value = value;
        if value.partial_cmp(&value).is_none() {
            return self.min.or(self.max).unwrap_or(value);
        }
        if let Some(min) = self.min {
            if value < min {
                value = min;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                value = max;
            }
        }
        value
    }

    /// Reject inverted bounds and non-positive steps
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(format!("min {:?} is greater than max {:?}", min, max));
            }
        }
        if let Some(step) = self.step {
            if !(step > T::default()) {
                return Err(format!("step {:?} must be positive", step));
            }
        }
        Ok(())
    }
}

impl NumericRange<f32> {
    fn clamp_vec2(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.clamp(v.x), self.clamp(v.y))
    }

    fn clamp_vec3(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.clamp(v.x), self.clamp(v.y), self.clamp(v.z))
    }
}

// ===== PARAMETER KIND =====

/// Discriminant of a ParameterValue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Bool,
    Int,
    Float,
    Vector2,
    Vector3,
    Matrix3,
    Matrix4,
    Color,
    Texture,
    TextureBool,
    CubeMap,
    CubeMapBool,
}

impl ParameterKind {
    /// Consumes a texture unit when sent
    pub fn is_texture_bearing(self) -> bool {
        matches!(
            self,
            ParameterKind::Texture
                | ParameterKind::TextureBool
                | ParameterKind::CubeMap
                | ParameterKind::CubeMapBool
        )
    }

    /// Writes a derived validity boolean next to its resource
    pub fn is_compound(self) -> bool {
        matches!(self, ParameterKind::TextureBool | ParameterKind::CubeMapBool)
    }
}

// ===== PARAMETER VALUE =====

/// Value held by a material parameter
#[derive(Clone)]
pub enum ParameterValue {
    Bool(bool),
    Int { value: i32, range: NumericRange<i32> },
    Float { value: f32, range: NumericRange<f32> },
    Vector2 { value: Vec2, range: NumericRange<f32> },
    Vector3 { value: Vec3, range: NumericRange<f32> },
    Matrix3(Mat3),
    Matrix4(Mat4),
    Color(Color),
    Texture(Option<Arc<dyn Texture>>),
    TextureBool(Option<Arc<dyn Texture>>),
    CubeMap(Option<Arc<dyn CubeMap>>),
    CubeMapBool(Option<Arc<dyn CubeMap>>),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Bool(_) => ParameterKind::Bool,
            ParameterValue::Int { .. } => ParameterKind::Int,
            ParameterValue::Float { .. } => ParameterKind::Float,
            ParameterValue::Vector2 { .. } => ParameterKind::Vector2,
            ParameterValue::Vector3 { .. } => ParameterKind::Vector3,
            ParameterValue::Matrix3(_) => ParameterKind::Matrix3,
            ParameterValue::Matrix4(_) => ParameterKind::Matrix4,
            ParameterValue::Color(_) => ParameterKind::Color,
            ParameterValue::Texture(_) => ParameterKind::Texture,
            ParameterValue::TextureBool(_) => ParameterKind::TextureBool,
            ParameterValue::CubeMap(_) => ParameterKind::CubeMap,
            ParameterValue::CubeMapBool(_) => ParameterKind::CubeMapBool,
        }
    }

    /// Re-apply the value's own range (after a range change or an edit)
    pub(crate) fn clamp_in_place(&mut self) {
        match self {
            ParameterValue::Int { value, range } => *value = range.clamp(*value),
            ParameterValue::Float { value, range } => *value = range.clamp(*value),
            ParameterValue::Vector2 { value, range } => *value = range.clamp_vec2(*value),
            ParameterValue::Vector3 { value, range } => *value = range.clamp_vec3(*value),
            _ => {}
        }
    }
}

impl fmt::Debug for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(v) => write!(f, "Bool({})", v),
            ParameterValue::Int { value, .. } => write!(f, "Int({})", value),
            ParameterValue::Float { value, .. } => write!(f, "Float({})", value),
            ParameterValue::Vector2 { value, .. } => write!(f, "Vector2({:?})", value),
            ParameterValue::Vector3 { value, .. } => write!(f, "Vector3({:?})", value),
            ParameterValue::Matrix3(m) => write!(f, "Matrix3({:?})", m),
            ParameterValue::Matrix4(m) => write!(f, "Matrix4({:?})", m),
            ParameterValue::Color(c) => write!(f, "Color({:?})", c),
            ParameterValue::Texture(t) | ParameterValue::TextureBool(t) => write!(
                f,
                "{:?}({:?})",
                self.kind(),
                t.as_ref().map(|t| t.handle())
            ),
            ParameterValue::CubeMap(c) | ParameterValue::CubeMapBool(c) => write!(
                f,
                "{:?}({:?})",
                self.kind(),
                c.as_ref().map(|c| c.handle())
            ),
        }
    }
}

// ===== TYPED ACCESS =====

/// Rust types that map onto exactly one value-type parameter kind
///
/// Provides the checked downcast behind typed getters and setters:
/// `extract` returns `None` and `store` returns `false` on a kind mismatch.
pub trait ParameterType: Copy {
    const KIND: ParameterKind;

    /// Read the value if `value` is of kind `KIND`
    fn extract(value: &ParameterValue) -> Option<Self>;

    /// Overwrite (clamped) if `value` is of kind `KIND`
    fn store(value: &mut ParameterValue, new: Self) -> bool;

    /// Unbounded value of kind `KIND`
    fn into_value(self) -> ParameterValue;
}

impl ParameterType for bool {
    const KIND: ParameterKind = ParameterKind::Bool;

    fn extract(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn store(value: &mut ParameterValue, new: Self) -> bool {
        match value {
            ParameterValue::Bool(v) => {
                *v = new;
                true
            }
            _ => false,
        }
    }

    fn into_value(self) -> ParameterValue {
        ParameterValue::Bool(self)
    }
}

/// Ranged kinds: stored value is clamped to the parameter's range
macro_rules! impl_ranged_parameter_type {
    ($ty:ty, $variant:ident, $clamp:ident) => {
        impl ParameterType for $ty {
            const KIND: ParameterKind = ParameterKind::$variant;

            fn extract(value: &ParameterValue) -> Option<Self> {
                match value {
                    ParameterValue::$variant { value, .. } => Some(*value),
                    _ => None,
                }
            }

            fn store(value: &mut ParameterValue, new: Self) -> bool {
                match value {
                    ParameterValue::$variant { value, range } => {
                        *value = range.$clamp(new);
                        true
                    }
                    _ => false,
                }
            }

            fn into_value(self) -> ParameterValue {
                ParameterValue::$variant { value: self, range: NumericRange::unbounded() }
            }
        }
    };
}

impl_ranged_parameter_type!(i32, Int, clamp);
impl_ranged_parameter_type!(f32, Float, clamp);
impl_ranged_parameter_type!(Vec2, Vector2, clamp_vec2);
impl_ranged_parameter_type!(Vec3, Vector3, clamp_vec3);

/// Unranged kinds stored as a plain tuple variant
macro_rules! impl_plain_parameter_type {
    ($ty:ty, $variant:ident) => {
        impl ParameterType for $ty {
            const KIND: ParameterKind = ParameterKind::$variant;

            fn extract(value: &ParameterValue) -> Option<Self> {
                match value {
                    ParameterValue::$variant(v) => Some(*v),
                    _ => None,
                }
            }

            fn store(value: &mut ParameterValue, new: Self) -> bool {
                match value {
                    ParameterValue::$variant(v) => {
                        *v = new;
                        true
                    }
                    _ => false,
                }
            }

            fn into_value(self) -> ParameterValue {
                ParameterValue::$variant(self)
            }
        }
    };
}

impl_plain_parameter_type!(Mat3, Matrix3);
impl_plain_parameter_type!(Mat4, Matrix4);
impl_plain_parameter_type!(Color, Color);

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
