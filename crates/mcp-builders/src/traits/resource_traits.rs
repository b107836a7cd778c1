//! Fine-grained resource metadata traits, plus the `ui://` constraint
//! check (spec §3.2) shared by every resource implementation.

use mcp_protocol::Resource;

pub trait HasResourceMetadata {
    fn uri(&self) -> &str;
    fn name(&self) -> &str;
}

pub trait HasResourceDescription {
    fn description(&self) -> Option<&str> {
        None
    }
}

pub trait HasResourceMimeType {
    fn mime_type(&self) -> Option<&str> {
        None
    }
}

pub trait HasResourceVisibility {
    fn hidden(&self) -> bool {
        false
    }
}

pub trait ResourceDefinition: HasResourceMetadata + HasResourceDescription + HasResourceMimeType + HasResourceVisibility + Send + Sync {
    fn to_resource(&self) -> Resource {
        Resource {
            uri: self.uri().to_string(),
            name: self.name().to_string(),
            description: self.description().map(String::from),
            mime_type: self.mime_type().map(String::from),
        }
    }

    /// Validate the `ui://` scheme / MIME-type pairing invariant; returns
    /// `Err` with a human-readable message on mismatch (spec §3.2).
    fn validate_ui_constraint(&self) -> Result<(), String> {
        mcp_protocol::content::validate_ui_resource(self.uri(), self.mime_type().unwrap_or(""))
    }
}

impl<T> ResourceDefinition for T where T: HasResourceMetadata + HasResourceDescription + HasResourceMimeType + HasResourceVisibility + Send + Sync {}
