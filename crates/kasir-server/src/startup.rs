//! Server startup utilities.

use kasir_config::{AppConfig, CacheBackend};
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    __ __           _
   / //_/___ ______(_)____
  / ,< / __ `/ ___/ / ___/
 / /| / /_/ (__  ) / /
/_/ |_\__,_/____/_/_/
    "#);
}

/// Formats the lines printed once the listener is bound.
#[must_use]
pub fn startup_lines(config: &AppConfig) -> Vec<String> {
    let addr = config.server.addr();
    let base = config.server.base_path.trim_end_matches('/');
    let cache = match config.redis.backend {
        CacheBackend::Redis => format!("redis ({:?} invalidation)", config.redis.invalidation),
        CacheBackend::Memory => format!("memory ({:?} invalidation)", config.redis.invalidation),
        CacheBackend::Disabled => "disabled".to_string(),
    };

    vec![
        format!("REST API:  http://{addr}{base}/transaction"),
        format!("Health:    http://{addr}/health"),
        format!("API Docs:  http://{addr}/swagger-ui"),
        format!("Cache:     {cache}"),
    ]
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    for line in startup_lines(config) {
        info!("{}", line);
    }
    info!("{}", separator);
}
