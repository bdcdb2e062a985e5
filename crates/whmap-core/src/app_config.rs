use std::net::SocketAddr;

use crate::geo::WarehouseFallback;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Map tile provider credential. `None` selects the free basemap.
    pub mapbox_api_key: Option<String>,
    pub warehouse_fallback: WarehouseFallback,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    #[must_use]
    pub fn has_map_credential(&self) -> bool {
        self.mapbox_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "mapbox_api_key",
                &self.mapbox_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("warehouse_fallback", &self.warehouse_fallback)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}
