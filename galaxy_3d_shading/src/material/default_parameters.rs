//! Default-parameter registry
//!
//! Well-known shading roles, each with one canonical name. Materials built
//! through the role factories use the canonical name both as parameter name
//! and as uniform name, so renderers and shaders can agree on them without
//! ad-hoc strings.
//!
//! Texture-bearing roles have a companion validity boolean named
//! `VALIDITY_PREFIX + canonical name` (e.g. `UseNormalTexture`).

use std::sync::LazyLock;
use crate::material::ParameterKind;

/// Prefix of the companion boolean of a texture-bearing role
pub const VALIDITY_PREFIX: &str = "Use";

/// Semantic shading roles, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefaultParameter {
    // Surface
    BaseColor,
    BaseColorTexture,
    NormalTexture,
    NormalScale,
    Metallic,
    Roughness,
    MetallicRoughnessTexture,
    OcclusionTexture,
    OcclusionStrength,
    EmissiveColor,
    EmissiveTexture,
    EmissiveIntensity,
    AlphaCutoff,
    UvScale,
    // Environment
    EnvironmentMap,
    IrradianceMap,
    // Transforms and camera
    ModelMatrix,
    ViewMatrix,
    ProjectionMatrix,
    ViewProjectionMatrix,
    NormalMatrix,
    CameraPosition,
    // Lights
    AmbientColor,
    DirectionalLightCount,
    PointLightCount,
    SpotLightCount,
    // Shadows
    ShadowMap,
    ShadowMatrix,
    ShadowBias,
    ShadowSoftness,
    // Frame
    Time,
}

impl DefaultParameter {
    /// Every role, in registry order
    pub const ALL: [DefaultParameter; 31] = [
        DefaultParameter::BaseColor,
        DefaultParameter::BaseColorTexture,
        DefaultParameter::NormalTexture,
        DefaultParameter::NormalScale,
        DefaultParameter::Metallic,
        DefaultParameter::Roughness,
        DefaultParameter::MetallicRoughnessTexture,
        DefaultParameter::OcclusionTexture,
        DefaultParameter::OcclusionStrength,
        DefaultParameter::EmissiveColor,
        DefaultParameter::EmissiveTexture,
        DefaultParameter::EmissiveIntensity,
        DefaultParameter::AlphaCutoff,
        DefaultParameter::UvScale,
        DefaultParameter::EnvironmentMap,
        DefaultParameter::IrradianceMap,
        DefaultParameter::ModelMatrix,
        DefaultParameter::ViewMatrix,
        DefaultParameter::ProjectionMatrix,
        DefaultParameter::ViewProjectionMatrix,
        DefaultParameter::NormalMatrix,
        DefaultParameter::CameraPosition,
        DefaultParameter::AmbientColor,
        DefaultParameter::DirectionalLightCount,
        DefaultParameter::PointLightCount,
        DefaultParameter::SpotLightCount,
        DefaultParameter::ShadowMap,
        DefaultParameter::ShadowMatrix,
        DefaultParameter::ShadowBias,
        DefaultParameter::ShadowSoftness,
        DefaultParameter::Time,
    ];

    /// Canonical name
    pub const fn name(self) -> &'static str {
        match self {
            DefaultParameter::BaseColor => "BaseColor",
            DefaultParameter::BaseColorTexture => "BaseColorTexture",
            DefaultParameter::NormalTexture => "NormalTexture",
            DefaultParameter::NormalScale => "NormalScale",
            DefaultParameter::Metallic => "Metallic",
            DefaultParameter::Roughness => "Roughness",
            DefaultParameter::MetallicRoughnessTexture => "MetallicRoughnessTexture",
            DefaultParameter::OcclusionTexture => "OcclusionTexture",
            DefaultParameter::OcclusionStrength => "OcclusionStrength",
            DefaultParameter::EmissiveColor => "EmissiveColor",
            DefaultParameter::EmissiveTexture => "EmissiveTexture",
            DefaultParameter::EmissiveIntensity => "EmissiveIntensity",
            DefaultParameter::AlphaCutoff => "AlphaCutoff",
            DefaultParameter::UvScale => "UvScale",
            DefaultParameter::EnvironmentMap => "EnvironmentMap",
            DefaultParameter::IrradianceMap => "IrradianceMap",
            DefaultParameter::ModelMatrix => "ModelMatrix",
            DefaultParameter::ViewMatrix => "ViewMatrix",
            DefaultParameter::ProjectionMatrix => "ProjectionMatrix",
            DefaultParameter::ViewProjectionMatrix => "ViewProjectionMatrix",
            DefaultParameter::NormalMatrix => "NormalMatrix",
            DefaultParameter::CameraPosition => "CameraPosition",
            DefaultParameter::AmbientColor => "AmbientColor",
            DefaultParameter::DirectionalLightCount => "DirectionalLightCount",
            DefaultParameter::PointLightCount => "PointLightCount",
            DefaultParameter::SpotLightCount => "SpotLightCount",
            DefaultParameter::ShadowMap => "ShadowMap",
            DefaultParameter::ShadowMatrix => "ShadowMatrix",
            DefaultParameter::ShadowBias => "ShadowBias",
            DefaultParameter::ShadowSoftness => "ShadowSoftness",
            DefaultParameter::Time => "Time",
        }
    }

    /// Kind of parameter the role expects
    pub const fn kind(self) -> ParameterKind {
        match self {
            DefaultParameter::BaseColor
            | DefaultParameter::EmissiveColor
            | DefaultParameter::AmbientColor => ParameterKind::Color,
            DefaultParameter::BaseColorTexture
            | DefaultParameter::NormalTexture
            | DefaultParameter::MetallicRoughnessTexture
            | DefaultParameter::OcclusionTexture
            | DefaultParameter::EmissiveTexture
            | DefaultParameter::ShadowMap => ParameterKind::TextureBool,
            DefaultParameter::EnvironmentMap
            | DefaultParameter::IrradianceMap => ParameterKind::CubeMapBool,
            DefaultParameter::NormalScale
            | DefaultParameter::Metallic
            | DefaultParameter::Roughness
            | DefaultParameter::OcclusionStrength
            | DefaultParameter::EmissiveIntensity
            | DefaultParameter::AlphaCutoff
            | DefaultParameter::ShadowBias
            | DefaultParameter::ShadowSoftness
            | DefaultParameter::Time => ParameterKind::Float,
            DefaultParameter::UvScale => ParameterKind::Vector2,
            DefaultParameter::CameraPosition => ParameterKind::Vector3,
            DefaultParameter::NormalMatrix => ParameterKind::Matrix3,
            DefaultParameter::ModelMatrix
            | DefaultParameter::ViewMatrix
            | DefaultParameter::ProjectionMatrix
            | DefaultParameter::ViewProjectionMatrix
            | DefaultParameter::ShadowMatrix => ParameterKind::Matrix4,
            DefaultParameter::DirectionalLightCount
            | DefaultParameter::PointLightCount
            | DefaultParameter::SpotLightCount => ParameterKind::Int,
        }
    }

    /// Companion boolean name, for texture-bearing roles only
    pub fn validity_name(self) -> Option<&'static str> {
        VALIDITY_NAMES[self as usize].as_deref()
    }

    /// Reverse lookup by canonical name
    pub fn from_name(name: &str) -> Option<DefaultParameter> {
        Self::ALL.iter().copied().find(|role| role.name() == name)
    }
}

/// Companion names, derived once from the canonical names
static VALIDITY_NAMES: LazyLock<Vec<Option<String>>> = LazyLock::new(|| {
    DefaultParameter::ALL
        .iter()
        .map(|role| {
            role.kind()
                .is_texture_bearing()
                .then(|| format!("{}{}", VALIDITY_PREFIX, role.name()))
        })
        .collect()
});

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "default_parameters_tests.rs"]
mod tests;
