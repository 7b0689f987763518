/*!
# Galaxy 3D Shading

Material and shader-parameter binding for the Galaxy 3D engine.

A **Material** is a named collection of typed **Parameters** bound to a
**Shader**. At draw time the renderer binds the shader, asks the material to
send its parameters, issues the draw call, then asks the material to clean up
the texture units it claimed. Graphics backends plug in by implementing the
`Shader`, `Texture`, `CubeMap` and `ShadowMap` traits.

## Architecture

- **Shader**: Bound program trait (uniform lookup, typed setters, texture units)
- **BindingContext**: Texture/image unit allocator threaded through a draw call
- **Parameter**: One named value bound to one uniform, with a cached location
- **DefaultParameter**: Registry of well-known shading roles and their names
- **Material**: Insertion-ordered parameters, owned or shared

Backend implementations (OpenGL, ...) live in their own crates.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics;
pub mod material;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logger)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Graphics collaborator traits
    pub mod graphics {
        pub use crate::graphics::*;
    }

    // Material sub-module
    pub mod material {
        pub use crate::material::*;
    }
}

// Re-export math library at crate root
pub use glam;
