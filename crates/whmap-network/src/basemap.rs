//! Background map selection.
//!
//! A credentialed provider is used when a token is configured; otherwise a
//! free tile style is chosen so the map still has a background.

use serde::{Deserialize, Serialize};

pub const MAPBOX_LIGHT_STYLE: &str = "mapbox://styles/mapbox/light-v10";
pub const CARTO_POSITRON_STYLE: &str =
    "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasemapProvider {
    Mapbox,
    Carto,
}

impl std::fmt::Display for BasemapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasemapProvider::Mapbox => write!(f, "mapbox"),
            BasemapProvider::Carto => write!(f, "carto"),
        }
    }
}

/// Scene-level basemap description. Never carries the credential itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasemapConfig {
    pub provider: BasemapProvider,
    pub style: String,
    pub requires_credential: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasemapSelector {
    credentialed_style: String,
    fallback_style: String,
}

impl BasemapSelector {
    #[must_use]
    pub fn new(credentialed_style: impl Into<String>, fallback_style: impl Into<String>) -> Self {
        Self {
            credentialed_style: credentialed_style.into(),
            fallback_style: fallback_style.into(),
        }
    }

    /// Infallible: without a credential the free provider is returned.
    #[must_use]
    pub fn select(&self, has_credential: bool) -> BasemapConfig {
        if has_credential {
            BasemapConfig {
                provider: BasemapProvider::Mapbox,
                style: self.credentialed_style.clone(),
                requires_credential: true,
            }
        } else {
            BasemapConfig {
                provider: BasemapProvider::Carto,
                style: self.fallback_style.clone(),
                requires_credential: false,
            }
        }
    }
}

impl Default for BasemapSelector {
    fn default() -> Self {
        Self::new(MAPBOX_LIGHT_STYLE, CARTO_POSITRON_STYLE)
    }
}
