use serde::Deserialize;

/// Configuration options of the photo album server.
///
/// Loaded from `config/default.yaml`, an optional `config/local.yaml` and
/// `APP__*` environment variables, in that order of precedence.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Path or URL of the SQLite database.
    pub database_url: String,
    /// Secret used to sign session and flash cookies. Must be at least 64 bytes.
    pub secret_key: String,
    /// Glob of Tera templates.
    pub templates_dir: String,
    /// Mark cookies as HTTPS-only.
    #[serde(default)]
    pub secure_cookies: bool,
}
