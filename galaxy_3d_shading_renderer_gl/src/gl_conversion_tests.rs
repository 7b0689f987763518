//! Unit tests for GL handle conversions
//!
//! Pure mapping functions, no GL context required.

use super::*;

#[test]
fn test_texture_handle_round_trip() {
    let texture = glow::NativeTexture(NonZeroU32::new(17).unwrap());
    let handle = texture_to_handle(texture);
    assert_eq!(handle, TextureHandle(17));
    assert_eq!(handle_to_texture(handle), Some(texture));
}

#[test]
fn test_zero_handle_is_no_texture() {
    assert_eq!(handle_to_texture(TextureHandle(0)), None);
}

#[test]
fn test_absent_uniform_is_invalid() {
    assert_eq!(location_from_gl(None), UniformLocation::INVALID);
    assert_eq!(location_to_gl(UniformLocation::INVALID), None);
}

#[test]
fn test_uniform_location_mapping() {
    let location = location_from_gl(Some(glow::NativeUniformLocation(5)));
    assert_eq!(location, UniformLocation(5));
    assert_eq!(location_to_gl(location).map(|l| l.0), Some(5));
}

#[test]
fn test_out_of_range_location_is_invalid() {
    assert_eq!(
        location_from_gl(Some(glow::NativeUniformLocation(u32::MAX))),
        UniformLocation::INVALID
    );
}

#[test]
fn test_texture_targets() {
    assert_eq!(target_to_gl(TextureTarget::Texture2D), glow::TEXTURE_2D);
    assert_eq!(target_to_gl(TextureTarget::CubeMap), glow::TEXTURE_CUBE_MAP);
}
