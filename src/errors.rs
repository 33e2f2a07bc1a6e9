//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ProxyError`] covers all failure modes including:
//! - Precondition failures on the source armature (no bones, wrong object kind)
//! - Index space exhaustion while assembling the proxy mesh
//! - Invalid or unparsable settings
//!
//! Precondition failures are always raised before any mesh sink interaction,
//! so a failed generation run never leaves a partial mesh object behind.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ProxyError>`.
//!
//! ```rust,ignore
//! use armature_proxy::errors::{ProxyError, Result};
//!
//! fn generate() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for proxy mesh generation.
#[derive(Error, Debug)]
pub enum ProxyError {
    // ========================================================================
    // Armature Preconditions
    // ========================================================================
    /// The armature has no bones to build a proxy for.
    #[error("Armature '{armature}' has no bones")]
    EmptyArmature {
        /// Name of the offending armature
        armature: String,
    },

    /// The source object is not an armature.
    #[error("Object '{0}' is not an armature")]
    NotAnArmature(String),

    /// Two bones share a name, so their vertex groups would collide.
    #[error("Duplicate bone name: {0}")]
    DuplicateBoneName(String),

    // ========================================================================
    // Assembly Errors
    // ========================================================================
    /// The global vertex count no longer fits in a `u32` index.
    #[error("Vertex index overflow: {0} vertices exceed the u32 index range")]
    VertexIndexOverflow(usize),

    // ========================================================================
    // Scene Errors
    // ========================================================================
    /// A scene handle no longer resolves to an object.
    #[error("Object not found")]
    ObjectNotFound,

    /// A vertex group refers past the end of the mesh.
    #[error("Vertex {index} out of range (mesh has {count} vertices)")]
    VertexOutOfRange {
        /// The invalid vertex index
        index: u32,
        /// Vertex count of the mesh
        count: usize,
    },

    /// An object cannot be parented to itself.
    #[error("Cannot parent '{0}' to itself")]
    SelfParent(String),

    /// Parenting would make an object its own ancestor.
    #[error("Parenting '{child}' to '{parent}' would create a cycle")]
    ParentCycle {
        /// Object being parented
        child: String,
        /// Requested parent, currently a descendant of `child`
        parent: String,
    },

    // ========================================================================
    // Settings Errors
    // ========================================================================
    /// Settings failed validation.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, ProxyError>`.
pub type Result<T> = std::result::Result<T, ProxyError>;
