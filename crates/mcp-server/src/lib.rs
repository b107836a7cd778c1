//! In-process MCP server runtime: the Registry, Dispatcher, session
//! manager, Context builder, result normalizer, metadata keyring, and
//! stdio transport (spec §3, §4.5–§4.9). `mcp-http-server` builds the
//! HTTP/SSE transports on top of the same [`Registry`]/[`Dispatcher`]
//! pair.

pub mod context;
pub mod dispatcher;
pub mod metadata_store;
pub mod normalize;
pub mod registry;
pub mod session;
pub mod stdio;

pub mod prelude {
    pub use crate::context::{current, with_context, Context, SamplingFn, ScopedLogger, SessionNotifier};
    pub use crate::dispatcher::Dispatcher;
    pub use crate::normalize::{error_result, normalize, normalize_value, HandlerOutput};
    pub use crate::registry::Registry;
    pub use crate::session::{SessionContext, SessionManager, SessionNotification};
}

pub use prelude::*;
