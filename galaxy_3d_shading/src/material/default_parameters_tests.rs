use super::*;

#[test]
fn test_all_contains_every_role_once_in_order() {
    for (index, role) in DefaultParameter::ALL.iter().enumerate() {
        assert_eq!(*role as usize, index);
    }
}

#[test]
fn test_canonical_names_are_unique() {
    let mut names: Vec<&str> = DefaultParameter::ALL.iter().map(|r| r.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), DefaultParameter::ALL.len());
}

#[test]
fn test_from_name_round_trips() {
    for role in DefaultParameter::ALL {
        assert_eq!(DefaultParameter::from_name(role.name()), Some(role));
    }
    assert_eq!(DefaultParameter::from_name("u_Roughness"), None);
}

#[test]
fn test_validity_names_follow_prefix_rule() {
    assert_eq!(DefaultParameter::NormalTexture.validity_name(), Some("UseNormalTexture"));
    assert_eq!(DefaultParameter::EnvironmentMap.validity_name(), Some("UseEnvironmentMap"));
    assert_eq!(DefaultParameter::ShadowMap.validity_name(), Some("UseShadowMap"));
    assert_eq!(DefaultParameter::Roughness.validity_name(), None);
}

#[test]
fn test_validity_name_exactly_for_texture_bearing_roles() {
    for role in DefaultParameter::ALL {
        assert_eq!(role.validity_name().is_some(), role.kind().is_texture_bearing());
        if let Some(validity) = role.validity_name() {
            assert_eq!(validity, format!("{}{}", VALIDITY_PREFIX, role.name()));
        }
    }
}

#[test]
fn test_role_kinds() {
    assert_eq!(DefaultParameter::BaseColor.kind(), ParameterKind::Color);
    assert_eq!(DefaultParameter::Roughness.kind(), ParameterKind::Float);
    assert_eq!(DefaultParameter::UvScale.kind(), ParameterKind::Vector2);
    assert_eq!(DefaultParameter::NormalMatrix.kind(), ParameterKind::Matrix3);
    assert_eq!(DefaultParameter::ShadowMatrix.kind(), ParameterKind::Matrix4);
    assert_eq!(DefaultParameter::PointLightCount.kind(), ParameterKind::Int);
    assert_eq!(DefaultParameter::IrradianceMap.kind(), ParameterKind::CubeMapBool);
}
