/// Graphics module - collaborator traits consumed by the material system

// Module declarations
pub mod shader;
pub mod texture;
pub mod binding;
pub mod uniform_cache;

// Re-exports
pub use shader::*;
pub use texture::*;
pub use binding::*;
pub use uniform_cache::*;

// Mock graphics layer for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics;
