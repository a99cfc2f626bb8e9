use crate::geo::Coordinate;

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
    pub log_level: String,
    /// Credential for the AMap web-service REST endpoints (district + geocode).
    pub amap_web_key: String,
    pub amap_base_url: String,
    /// Credential and security token for the interactive mapping SDK.
    pub amap_js_key: Option<String>,
    pub amap_security_code: Option<String>,
    pub provider_timeout_secs: u64,
    /// City context passed to the geocoder; `全国` searches nationwide.
    pub geocode_city: String,
    pub api_url: String,
    pub api_timeout_secs: u64,
    /// Where the map picker lands when nothing better is known.
    pub default_coordinate: Coordinate,
    pub map_zoom: u8,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("amap_web_key", &"[redacted]")
            .field("amap_base_url", &self.amap_base_url)
            .field("amap_js_key", &self.amap_js_key.as_ref().map(|_| "[redacted]"))
            .field(
                "amap_security_code",
                &self.amap_security_code.as_ref().map(|_| "[redacted]"),
            )
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("geocode_city", &self.geocode_city)
            .field("api_url", &self.api_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("default_coordinate", &self.default_coordinate)
            .field("map_zoom", &self.map_zoom)
            .finish()
    }
}
