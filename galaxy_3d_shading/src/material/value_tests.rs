use super::*;

// ============================================================================
// COLOR
// ============================================================================

#[test]
fn test_color_constants_and_default() {
    assert_eq!(Color::default(), Color::WHITE);
    assert_eq!(Color::BLACK.a, 1.0);
    assert_eq!(Color::TRANSPARENT.a, 0.0);
}

#[test]
fn test_color_conversions() {
    let c = Color::rgba(0.1, 0.2, 0.3, 0.4);
    assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.4]);
    assert_eq!(Color::from([0.1, 0.2, 0.3, 0.4]), c);
    assert_eq!(Color::from([0.5, 0.5, 0.5]).a, 1.0);
    let v: Vec4 = c.into();
    assert_eq!(Color::from(v), c);
}

#[test]
fn test_color_saturate() {
    let c = Color::rgba(-1.0, 0.5, 2.0, 1.5).saturate();
    assert_eq!(c, Color::rgba(0.0, 0.5, 1.0, 1.0));
}

// ============================================================================
// NUMERIC RANGE
// ============================================================================

#[test]
fn test_unbounded_range_does_not_clamp() {
    let range = NumericRange::<f32>::unbounded();
    assert!(!range.is_bounded());
    assert_eq!(range.clamp(1e9), 1e9);
}

#[test]
fn test_range_clamps_each_bound() {
    let range = NumericRange::between(0.0_f32, 1.0);
    assert_eq!(range.clamp(-0.5), 0.0);
    assert_eq!(range.clamp(0.25), 0.25);
    assert_eq!(range.clamp(3.0), 1.0);

    let min_only = NumericRange { min: Some(2), max: None, step: None };
    assert!(min_only.is_bounded());
    assert_eq!(min_only.clamp(-5), 2);
    assert_eq!(min_only.clamp(50), 50);
}

#[test]
fn test_range_clamps_nan_to_a_bound() {
    let range = NumericRange::between(0.0_f32, 1.0);
    assert_eq!(range.clamp(f32::NAN), 0.0);

    let max_only = NumericRange { min: None, max: Some(2.0_f32), step: None };
    assert_eq!(max_only.clamp(f32::NAN), 2.0);

    let unbounded = NumericRange::<f32>::unbounded();
    assert!(unbounded.clamp(f32::NAN).is_nan());
}

#[test]
fn test_range_validate() {
    assert!(NumericRange::between(0, 10).with_step(1).validate().is_ok());
    assert!(NumericRange::between(1.0_f32, 0.0).validate().is_err());
    assert!(NumericRange::between(0.0_f32, 1.0).with_step(0.0).validate().is_err());
    assert!(NumericRange::<i32>::unbounded().with_step(-1).validate().is_err());
}

// ============================================================================
// PARAMETER KIND / VALUE
// ============================================================================

#[test]
fn test_kind_classification() {
    assert!(ParameterKind::Texture.is_texture_bearing());
    assert!(ParameterKind::CubeMapBool.is_texture_bearing());
    assert!(!ParameterKind::Matrix4.is_texture_bearing());
    assert!(ParameterKind::TextureBool.is_compound());
    assert!(!ParameterKind::Texture.is_compound());
}

#[test]
fn test_value_kind() {
    assert_eq!(ParameterValue::Bool(true).kind(), ParameterKind::Bool);
    assert_eq!(1.5_f32.into_value().kind(), ParameterKind::Float);
    assert_eq!(ParameterValue::CubeMap(None).kind(), ParameterKind::CubeMap);
}

#[test]
fn test_clamp_in_place_applies_range_to_vectors() {
    let mut value = ParameterValue::Vector3 {
        value: Vec3::new(-1.0, 0.5, 4.0),
        range: NumericRange::between(0.0, 1.0),
    };
    value.clamp_in_place();
    assert_eq!(Vec3::extract(&value), Some(Vec3::new(0.0, 0.5, 1.0)));
}

// ============================================================================
// TYPED ACCESS
// ============================================================================

#[test]
fn test_extract_checks_kind() {
    let value = 3_i32.into_value();
    assert_eq!(i32::extract(&value), Some(3));
    assert_eq!(f32::extract(&value), None);
    assert_eq!(bool::extract(&value), None);
}

#[test]
fn test_store_clamps_and_checks_kind() {
    let mut value = ParameterValue::Int { value: 0, range: NumericRange::between(0, 5) };
    assert!(i32::store(&mut value, 9));
    assert_eq!(i32::extract(&value), Some(5));
    assert!(!f32::store(&mut value, 1.0));
    assert_eq!(value.kind(), ParameterKind::Int);
}

#[test]
fn test_plain_kinds_round_through_store() {
    let mut value = Mat4::IDENTITY.into_value();
    let m = Mat4::from_translation(Vec3::X);
    assert!(Mat4::store(&mut value, m));
    assert_eq!(Mat4::extract(&value), Some(m));
    assert!(!Color::store(&mut value, Color::WHITE));
}

#[test]
fn test_value_debug_shows_texture_handle() {
    let value = ParameterValue::TextureBool(None);
    assert_eq!(format!("{:?}", value), "TextureBool(None)");
    assert_eq!(format!("{:?}", ParameterValue::Bool(true)), "Bool(true)");
}
