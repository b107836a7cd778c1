//! Inline auth configuration for a server declaration (spec §4.2 point
//! 4). Not a full OAuth provider — see DESIGN.md's "Dropped from the
//! teacher" section — just the static keys/clients/permissions a
//! `#[mcp_server(...)]` declaration's `#[auth(...)]` sub-attribute
//! carries.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthConfig {
    pub keys: Vec<String>,
    pub clients: Vec<String>,
    pub permissions: Vec<String>,
}

impl AuthConfig {
    pub fn accepts_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn accepts_client(&self, client_id: &str) -> bool {
        self.clients.is_empty() || self.clients.iter().any(|c| c == client_id)
    }
}
