//! Integration tests for `#[mcp_server(...)]` (spec §4.2 point 4) — the
//! smart name/version defaults and the auto-instantiation rule DESIGN.md
//! resolves for a unit-like server struct.

use mcp_derive::mcp_server;

#[mcp_server(name = "weather-server", version = "1.2.0", description = "Weather MCP server")]
#[auth(keys = ["demo-key"], clients = ["demo-client"], permissions = ["tools:call"])]
struct WeatherServer;

#[mcp_server]
struct MinimalServer;

#[test]
fn explicit_metadata_round_trips() {
    let info = WeatherServer::server_info();
    assert_eq!(info.name, "weather-server");
    assert_eq!(info.version, "1.2.0");
    assert_eq!(info.description.as_deref(), Some("Weather MCP server"));
}

#[test]
fn auth_config_carries_keys_clients_and_permissions() {
    let auth = WeatherServer::auth_config().unwrap();
    assert_eq!(auth.keys, vec!["demo-key".to_string()]);
    assert!(auth.accepts_key("demo-key"));
    assert!(!auth.accepts_key("other-key"));
}

#[test]
fn missing_attributes_fall_back_to_smart_defaults() {
    let info = MinimalServer::server_info();
    assert_eq!(info.name, "minimal-server");
    assert_eq!(info.version, "1.0.0");
    assert!(MinimalServer::auth_config().is_none());
}

#[test]
fn unit_struct_auto_instantiates() {
    let _server = MinimalServer::instance();
}
