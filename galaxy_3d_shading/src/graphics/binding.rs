/// Texture and image unit allocation for one draw call.
///
/// Send and clean passes thread the context by value: each texture-bearing
/// parameter claims the next unit and hands the advanced context on. The
/// renderer starts every draw call from `BindingContext::default()` and must
/// replay the same parameter order for the clean pass.
///
/// # Example
///
/// ```ignore
/// let ctx = material.send_parameters_to_shader(shader, BindingContext::default());
/// // draw...
/// material.clean(shader, BindingContext::default());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingContext {
    /// Next free texture unit
    pub texture_unit: u32,
    /// Next free image unit
    pub image_unit: u32,
}

impl BindingContext {
    /// Start allocating at the given units
    pub fn new(texture_unit: u32, image_unit: u32) -> Self {
        Self { texture_unit, image_unit }
    }

    /// Take the next texture unit
    ///
    /// Claimed units always fit the `i32` a sampler uniform holds. Returns
    /// `None`, without advancing, once that range is exhausted.
    pub fn claim_texture_unit(&mut self) -> Option<u32> {
        let unit = self.texture_unit;
        i32::try_from(unit).ok()?;
        self.texture_unit = unit.checked_add(1)?;
        Some(unit)
    }

    /// Take the next image unit, `None` once exhausted
    pub fn claim_image_unit(&mut self) -> Option<u32> {
        let unit = self.image_unit;
        i32::try_from(unit).ok()?;
        self.image_unit = unit.checked_add(1)?;
        Some(unit)
    }

    /// Texture units claimed since `start`
    pub fn texture_units_since(&self, start: &BindingContext) -> u32 {
        self.texture_unit.saturating_sub(start.texture_unit)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "binding_tests.rs"]
mod tests;
