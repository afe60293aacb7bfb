//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`LuciteError`] covers all failure modes including:
//! - Renderer initialization ordering violations
//! - Cube map bake failures (missing attributes, target allocation)
//! - Preset lookup errors
//!
//! Shading itself never fails: a malformed frame produces a visually wrong
//! but well-defined result. All fallible public APIs return [`Result<T>`],
//! an alias for `std::result::Result<T, LuciteError>`.

use thiserror::Error;

/// The main error type for the Lucite pipeline.
///
/// Each variant provides specific context about what went wrong. Bake
/// failures are load-time failures: a mesh whose cube maps could not be
/// produced must not have its effect material activated.
#[derive(Error, Debug)]
pub enum LuciteError {
    // ========================================================================
    // Renderer Errors
    // ========================================================================
    /// A bake or draw was requested before the renderer finished its
    /// one-time initialization.
    #[error("Renderer is not ready: {0}")]
    RendererNotReady(String),

    /// Render target allocation failed. Fatal for the affected mesh's bake.
    #[error("Render target allocation failed: {0}")]
    TargetAllocation(String),

    // ========================================================================
    // Geometry Errors
    // ========================================================================
    /// A geometry attribute required by the bake is missing.
    #[error("Geometry is missing required attribute '{attribute}' ({context})")]
    MissingAttribute {
        /// Name of the missing attribute
        attribute: &'static str,
        /// Description of the operation that needed it
        context: &'static str,
    },

    /// The geometry holds no triangles (empty or truncated index data).
    #[error("Geometry has no triangles: {0}")]
    EmptyGeometry(String),

    // ========================================================================
    // Texture & Preset Errors
    // ========================================================================
    /// Image dimensions and pixel data do not agree.
    #[error("Image data error: {0}")]
    ImageData(String),

    /// A named texture or color preset does not exist.
    #[error("Preset not found: {0}")]
    PresetNotFound(String),
}

/// Alias for `Result<T, LuciteError>`.
pub type Result<T> = std::result::Result<T, LuciteError>;
