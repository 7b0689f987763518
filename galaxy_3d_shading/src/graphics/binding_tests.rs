use super::*;

#[test]
fn test_default_starts_at_zero() {
    let ctx = BindingContext::default();
    assert_eq!(ctx.texture_unit, 0);
    assert_eq!(ctx.image_unit, 0);
}

#[test]
fn test_claim_texture_unit_is_monotonic() {
    let mut ctx = BindingContext::new(3, 0);
    assert_eq!(ctx.claim_texture_unit(), Some(3));
    assert_eq!(ctx.claim_texture_unit(), Some(4));
    assert_eq!(ctx.texture_unit, 5);
    assert_eq!(ctx.image_unit, 0);
}

#[test]
fn test_claim_image_unit_leaves_texture_unit() {
    let mut ctx = BindingContext::default();
    assert_eq!(ctx.claim_image_unit(), Some(0));
    assert_eq!(ctx.claim_image_unit(), Some(1));
    assert_eq!(ctx.texture_unit, 0);
}

#[test]
fn test_texture_units_since() {
    let start = BindingContext::new(2, 0);
    let mut ctx = start;
    ctx.claim_texture_unit();
    ctx.claim_texture_unit();
    assert_eq!(ctx.texture_units_since(&start), 2);
    // Copy: the start context is untouched
    assert_eq!(start.texture_unit, 2);
    assert_eq!(start.texture_units_since(&ctx), 0);
}

#[test]
fn test_claim_stops_at_last_sampler_unit() {
    let last = i32::MAX as u32;
    let mut ctx = BindingContext::new(last, last);
    assert_eq!(ctx.claim_texture_unit(), Some(last));
    assert_eq!(ctx.claim_texture_unit(), None);
    assert_eq!(ctx.texture_unit, last + 1);
    assert_eq!(ctx.claim_image_unit(), Some(last));
    assert_eq!(ctx.claim_image_unit(), None);

    // Counters past the sampler range never wrap
    let mut ctx = BindingContext::new(u32::MAX, u32::MAX);
    assert_eq!(ctx.claim_texture_unit(), None);
    assert_eq!(ctx.claim_image_unit(), None);
    assert_eq!(ctx.texture_unit, u32::MAX);
}
