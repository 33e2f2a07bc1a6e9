//! Proxy mesh assembly
//!
//! - MeshAssembly: append-only accumulator of per-bone contributions
//! - assemble: drives the bone shape generator over an ordered bone list

pub mod assembler;
pub mod mesh_assembly;

pub use assembler::assemble;
pub use mesh_assembly::{MeshAssembly, SkinnedVertex, VertexGroup};
