//! Configuration loading against the shipped defaults.

use inlive_core::config::AppConfig;

#[test]
fn default_config_loads() {
    let config = AppConfig::load("default").expect("default config should parse");

    assert_eq!(config.server.port, 8080);
    assert!(config.server.max_body_size_bytes > 0);
    assert!(config.database.max_connections >= config.database.min_connections);
    assert_eq!(config.keycloak.realm, "inlive");
    assert!(!config.file_api.user_photos_dir.is_empty());
}

#[test]
fn environment_overlay_is_optional() {
    // An overlay file that does not exist must not fail the load.
    let config = AppConfig::load("does-not-exist").expect("missing overlay is fine");
    assert_eq!(config.server.host, "0.0.0.0");
}
