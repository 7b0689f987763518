/// Per-program uniform name to location memo.
///
/// Owned by a Shader implementation. Locations are only meaningful for the
/// program that produced them, so the owner must call `invalidate()` when it
/// relinks or swaps its program. Absent uniforms are memoized as
/// `UniformLocation::INVALID` like any other answer.
///
/// Interior mutability keeps `Shader::uniform_location(&self)` usable from
/// shared references on the render thread.

use std::cell::{Cell, RefCell};
use rustc_hash::FxHashMap;
use crate::graphics::UniformLocation;

pub struct UniformLocationCache {
    locations: RefCell<FxHashMap<String, UniformLocation>>,
    generation: Cell<u64>,
}

impl UniformLocationCache {
    /// Create an empty cache (generation 0)
    pub fn new() -> Self {
        Self {
            locations: RefCell::new(FxHashMap::default()),
            generation: Cell::new(0),
        }
    }

    /// Return the memoized location for `name`, querying the program on a miss
    pub fn get_or_query<F>(&self, name: &str, query: F) -> UniformLocation
    where
        F: FnOnce(&str) -> UniformLocation,
    {
        if let Some(location) = self.locations.borrow().get(name) {
            return *location;
        }
        let location = query(name);
        self.locations.borrow_mut().insert(name.to_string(), location);
        location
    }

    /// Memoized location, without querying
    pub fn get(&self, name: &str) -> Option<UniformLocation> {
        self.locations.borrow().get(name).copied()
    }

    /// Forget every location and start a new generation
    pub fn invalidate(&self) {
        self.locations.borrow_mut().clear();
        self.generation.set(self.generation.get() + 1);
    }

    /// Number of invalidations so far
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Number of memoized names
    pub fn len(&self) -> usize {
        self.locations.borrow().len()
    }

    /// Whether nothing is memoized
    pub fn is_empty(&self) -> bool {
        self.locations.borrow().is_empty()
    }
}

impl Default for UniformLocationCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "uniform_cache_tests.rs"]
mod tests;
