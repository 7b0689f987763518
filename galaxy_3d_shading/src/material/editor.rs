use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::graphics::{Texture, CubeMap};
use crate::material::{Color, NumericRange};

/// Editor hook for interactive parameter inspection.
///
/// Implemented by the UI layer. Each `edit_*` method displays a widget for
/// the value and returns `true` when the user changed it. Edited numeric
/// values are clamped to the parameter's range afterwards, so widgets may
/// use the range as a hint only.
///
/// Resource-bearing parameters are displayed, not edited: swapping
/// textures is an asset-management operation.
pub trait ParameterEditor {
    /// Called once before a material's parameters are visited
    fn begin_material(&mut self, _name: &str) {}

    /// Called once after a material's parameters are visited
    fn end_material(&mut self) {}

    fn edit_bool(&mut self, label: &str, value: &mut bool) -> bool;
    fn edit_int(&mut self, label: &str, value: &mut i32, range: &NumericRange<i32>) -> bool;
    fn edit_float(&mut self, label: &str, value: &mut f32, range: &NumericRange<f32>) -> bool;
    fn edit_vector2(&mut self, label: &str, value: &mut Vec2, range: &NumericRange<f32>) -> bool;
    fn edit_vector3(&mut self, label: &str, value: &mut Vec3, range: &NumericRange<f32>) -> bool;
    fn edit_color(&mut self, label: &str, value: &mut Color) -> bool;

    /// Matrices are usually driven by code; read-only unless overridden
    fn edit_matrix3(&mut self, _label: &str, _value: &mut Mat3) -> bool {
        false
    }

    fn edit_matrix4(&mut self, _label: &str, _value: &mut Mat4) -> bool {
        false
    }

    fn show_texture(&mut self, label: &str, texture: Option<&dyn Texture>);
    fn show_cube_map(&mut self, label: &str, cube_map: Option<&dyn CubeMap>);
}
