//! Material module
//!
//! Parameter values, parameters, the default-parameter registry and the
//! Material container that pushes them into a bound shader.

pub mod value;
pub mod parameter;
pub mod default_parameters;
pub mod editor;
pub mod material;

pub use value::{Color, NumericRange, ParameterKind, ParameterType, ParameterValue};
pub use parameter::Parameter;
pub use default_parameters::{DefaultParameter, VALIDITY_PREFIX};
pub use editor::ParameterEditor;
pub use material::{
    share_parameter, Material, MaterialDesc, ParameterRef, ParameterRefMut, ParameterSlot,
    SharedParameter,
};
