//! Proxy Mesh Settings
//!
//! Tunables for a generation run. The defaults reproduce the classic proxy
//! look: a length-proportional radius of `0.10 * (0.10 + length)` and an
//! object named `<armature>_proxy` unless an explicit `name` is set.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use armature_proxy::settings::{ProxyMeshSettings, RadiusSettings};
//!
//! // Default heuristic
//! let settings = ProxyMeshSettings::default();
//!
//! // Chunkier bones
//! let settings = ProxyMeshSettings {
//!     radius: RadiusSettings { scale: 0.2, ..Default::default() },
//!     ..Default::default()
//! };
//!
//! // Loaded from a JSON document; missing fields fall back to defaults
//! let settings = ProxyMeshSettings::from_json_str(r#"{ "name_suffix": "_vis" }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ProxyError, Result};

// ---------------------------------------------------------------------------
// RadiusSettings
// ---------------------------------------------------------------------------

/// Length-proportional cross-section radius: `scale * (padding + length)`.
///
/// `padding` keeps very short bones visible and avoids a zero radius for
/// zero-length bones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusSettings {
    pub scale: f32,
    pub padding: f32,
}

impl Default for RadiusSettings {
    fn default() -> Self {
        Self {
            scale: 0.10,
            padding: 0.10,
        }
    }
}

impl RadiusSettings {
    /// Base radius for a bone of the given rest length.
    #[inline]
    #[must_use]
    pub fn radius_for(&self, length: f32) -> f32 {
        self.scale * (self.padding + length)
    }
}

// ---------------------------------------------------------------------------
// ProxyMeshSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyMeshSettings {
    pub radius: RadiusSettings,

    /// Explicit proxy object name. Overrides `name_suffix` when set.
    pub name: Option<String>,

    /// Appended to the armature name to name the proxy object.
    pub name_suffix: String,

    /// Forwarded to the armature deform binding of the proxy object.
    pub use_vertex_groups: bool,
}

impl Default for ProxyMeshSettings {
    fn default() -> Self {
        Self {
            radius: RadiusSettings::default(),
            name: None,
            name_suffix: "_proxy".to_string(),
            use_vertex_groups: true,
        }
    }
}

impl ProxyMeshSettings {
    /// Parses settings from JSON and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let RadiusSettings { scale, padding } = self.radius;

        if !scale.is_finite() || scale <= 0.0 {
            return Err(ProxyError::InvalidSettings(format!(
                "radius.scale must be a positive finite number, got {scale}"
            )));
        }
        if !padding.is_finite() || padding < 0.0 {
            return Err(ProxyError::InvalidSettings(format!(
                "radius.padding must be a non-negative finite number, got {padding}"
            )));
        }
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ProxyError::InvalidSettings(
                "name must not be empty when given".to_string(),
            ));
        }
        Ok(())
    }

    /// Name given to the proxy object generated for `armature_name`.
    #[must_use]
    pub fn proxy_name(&self, armature_name: &str) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{armature_name}{}", self.name_suffix),
        }
    }
}
