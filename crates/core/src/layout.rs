//! Layout customisation settings for the public site chrome.
//!
//! These are cosmetic parameters (navbar placement and colour, branding
//! position and scale, hero text alignment) edited from the admin panel.
//! They are persisted locally under [`LAYOUT_SETTINGS_KEY`] and never synced
//! to the document store. Every field has a default so partially stored
//! settings still deserialize.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fixed key the settings are stored under.
pub const LAYOUT_SETTINGS_KEY: &str = "layoutSettings";

/// Navbar height bounds in pixels.
pub const MIN_NAVBAR_HEIGHT_PX: u16 = 40;
pub const MAX_NAVBAR_HEIGHT_PX: u16 = 160;

/// Branding scale bounds.
pub const MIN_BRANDING_SCALE: f32 = 0.5;
pub const MAX_BRANDING_SCALE: f32 = 2.0;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarSettings {
    pub position: NavbarPosition,
    pub height_px: u16,
    pub background: String,
}

impl Default for NavbarSettings {
    fn default() -> Self {
        Self {
            position: NavbarPosition::Top,
            height_px: 72,
            background: "#0b1220".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingSettings {
    pub position: Alignment,
    pub scale: f32,
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self {
            position: Alignment::Left,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSettings {
    pub text_align: Alignment,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            text_align: Alignment::Center,
        }
    }
}

/// The full layout configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub navbar: NavbarSettings,
    pub branding: BrandingSettings,
    pub hero: HeroSettings,
}

impl LayoutSettings {
    /// Check every field is within its allowed range.
    pub fn validate(&self) -> Result<(), CoreError> {
        let height = self.navbar.height_px;
        if !(MIN_NAVBAR_HEIGHT_PX..=MAX_NAVBAR_HEIGHT_PX).contains(&height) {
            return Err(CoreError::Validation(format!(
                "Navbar height must be between {MIN_NAVBAR_HEIGHT_PX} and {MAX_NAVBAR_HEIGHT_PX} pixels, got {height}"
            )));
        }

        if !HEX_COLOR.is_match(&self.navbar.background) {
            return Err(CoreError::Validation(format!(
                "Navbar background must be a hex colour like #1a2b3c, got '{}'",
                self.navbar.background
            )));
        }

        let scale = self.branding.scale;
        if !scale.is_finite() || !(MIN_BRANDING_SCALE..=MAX_BRANDING_SCALE).contains(&scale) {
            return Err(CoreError::Validation(format!(
                "Branding scale must be between {MIN_BRANDING_SCALE} and {MAX_BRANDING_SCALE}, got {scale}"
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
