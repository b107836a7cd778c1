//! Context Builder (spec §4.7): the per-invocation object passed to
//! every handler — a scoped logger, progress reporting, sampling,
//! resource reads, and session notification helpers. Grounded on the
//! teacher's `SessionContext` closures but assembled fresh per call
//! instead of threaded through the whole session lifetime, since its
//! scope is exactly one dispatch.

use std::sync::Arc;

use mcp_protocol::{CreateMessageParams, CreateMessageResult, McpError, McpResult, ResourceContents};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::registry::Registry;
use crate::session::SessionContext;

/// Emits a client-bound `notifications/progress` when present — only
/// constructed when the inbound call carried a `progressToken` (spec
/// §4.7 "present iff").
pub struct ProgressReporter {
    session: SessionContext,
    progress_token: Value,
}

impl ProgressReporter {
    pub fn report(&self, progress: f64, total: Option<f64>, message: Option<String>) {
        self.session.notify(
            "notifications/progress",
            serde_json::json!({
                "progressToken": self.progress_token,
                "progress": progress,
                "total": total,
                "message": message,
            }),
        );
    }
}

/// `context.session` helpers (spec §4.7): each swallows and logs any
/// transport error instead of propagating it to the handler.
#[derive(Clone)]
pub struct SessionNotifier {
    session: SessionContext,
}

impl SessionNotifier {
    pub fn send_resource_updated(&self, uri: &str) {
        self.session.notify("notifications/resources/updated", serde_json::json!({ "uri": uri }));
    }

    pub fn send_resource_list_changed(&self) {
        self.session.notify("notifications/resources/list_changed", serde_json::json!({}));
    }

    pub fn send_tool_list_changed(&self) {
        self.session.notify("notifications/tools/list_changed", serde_json::json!({}));
    }

    pub fn send_prompt_list_changed(&self) {
        self.session.notify("notifications/prompts/list_changed", serde_json::json!({}));
    }
}

/// Scoped logger: every call is tagged with the tool/prompt name that
/// requested it, and mirrored to the client as a `notifications/message`
/// when the server declares the `logging` capability.
#[derive(Clone)]
pub struct ScopedLogger {
    scope: String,
    session: SessionContext,
    logging_capability: bool,
}

impl ScopedLogger {
    fn emit(&self, level: &str, message: &str) {
        match level {
            "debug" => debug!(scope = %self.scope, "{message}"),
            "warn" => warn!(scope = %self.scope, "{message}"),
            "error" => error!(scope = %self.scope, "{message}"),
            _ => info!(scope = %self.scope, "{message}"),
        }
        if self.logging_capability {
            self.session.notify(
                "notifications/message",
                serde_json::json!({ "level": level, "logger": self.scope, "data": message }),
            );
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit("debug", message.as_ref());
    }
    pub fn info(&self, message: impl AsRef<str>) {
        self.emit("info", message.as_ref());
    }
    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit("warn", message.as_ref());
    }
    pub fn error(&self, message: impl AsRef<str>) {
        self.emit("error", message.as_ref());
    }
}

/// Sends a `sampling/createMessage` request back to the client and
/// awaits its `CreateMessageResult`. Only constructed when the client
/// declared sampling support (spec §4.7); requesting it otherwise fails
/// with `UnsupportedCapability`.
pub type SamplingFn =
    Arc<dyn Fn(CreateMessageParams) -> futures::future::BoxFuture<'static, McpResult<CreateMessageResult>> + Send + Sync>;

pub struct Context {
    pub logger: ScopedLogger,
    pub session: SessionNotifier,
    pub metadata: Option<Value>,
    progress: Option<ProgressReporter>,
    sample_fn: Option<SamplingFn>,
    registry: Arc<Registry>,
}

impl Context {
    pub fn new(
        scope: impl Into<String>,
        session: SessionContext,
        logging_capability: bool,
        progress_token: Option<Value>,
        sample_fn: Option<SamplingFn>,
        metadata: Option<Value>,
        registry: Arc<Registry>,
    ) -> Self {
        let progress = progress_token
            .map(|progress_token| ProgressReporter { session: session.clone(), progress_token });
        Self {
            logger: ScopedLogger { scope: scope.into(), session: session.clone(), logging_capability },
            session: SessionNotifier { session },
            metadata,
            progress,
            sample_fn,
            registry,
        }
    }

    pub fn report_progress(&self, progress: f64, total: Option<f64>, message: Option<String>) {
        if let Some(reporter) = &self.progress {
            reporter.report(progress, total, message);
        }
    }

    pub fn has_progress_token(&self) -> bool {
        self.progress.is_some()
    }

    pub async fn sample(&self, params: CreateMessageParams) -> McpResult<CreateMessageResult> {
        match &self.sample_fn {
            Some(f) => f(params).await,
            None => Err(McpError::unsupported_capability("sampling")),
        }
    }

    /// Reads a currently-registered resource the same way `resources/read`
    /// does — ignores the `hidden` flag, since a handler reading its own
    /// skill-bundled dependency should not be blocked by list filtering.
    pub async fn read_resource(&self, uri: &str) -> McpResult<Vec<ResourceContents>> {
        if let Some(markdown) = self.registry.skill_markdown(uri) {
            return Ok(vec![ResourceContents::Text(mcp_protocol::content::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some("text/markdown".to_string()),
                text: markdown,
            })]);
        }
        let resource = self.registry.get_resource(uri).ok_or_else(|| McpError::unknown_entity("resource", uri))?;
        resource.read().await
    }
}

tokio::task_local! {
    /// Scopes the active [`Context`] around a handler's `execute()` call.
    ///
    /// [`mcp_builders::ToolBuilder`] handlers are plain `Fn(Value) -> Fut`
    /// closures — extending that signature to also carry a `Context`
    /// would make `mcp-builders` depend on `mcp-server`, which already
    /// depends on `mcp-builders`. Scoping the context through a task
    /// local instead of a parameter keeps that dependency direction
    /// intact while still letting a handler reach progress/logging/
    /// sampling via [`current`].
    static CURRENT_CONTEXT: Arc<Context>
}

/// Runs `f` with `context` available to [`current`] for its duration.
pub async fn with_context<F, Fut, T>(context: Arc<Context>, f: F) -> T
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = T>,
{
    CURRENT_CONTEXT.scope(context, f()).await
}

/// The [`Context`] for the handler invocation currently in flight, if
/// called from within [`with_context`]'s scope.
pub fn current() -> Option<Arc<Context>> {
    CURRENT_CONTEXT.try_with(Arc::clone).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionManager;

    #[tokio::test]
    async fn progress_reporter_absent_without_token() {
        let manager = SessionManager::new();
        let session = manager.create().await;
        let registry = Arc::new(Registry::new());
        let context = Context::new("add", session, false, None, None, None, registry);
        assert!(!context.has_progress_token());
        context.report_progress(0.5, Some(1.0), None); // no-op, must not panic
    }

    #[tokio::test]
    async fn current_is_absent_outside_a_scoped_call() {
        assert!(current().is_none());
    }

    #[tokio::test]
    async fn with_context_scopes_current_to_the_call() {
        let manager = SessionManager::new();
        let session = manager.create().await;
        let registry = Arc::new(Registry::new());
        let context = Arc::new(Context::new("add", session, false, None, None, None, registry));
        let seen = with_context(Arc::clone(&context), || async { current().is_some() }).await;
        assert!(seen);
        assert!(current().is_none());
    }

    #[tokio::test]
    async fn sampling_without_capability_is_unsupported() {
        let manager = SessionManager::new();
        let session = manager.create().await;
        let registry = Arc::new(Registry::new());
        let context = Context::new("add", session, false, None, None, None, registry);
        let params = CreateMessageParams { messages: vec![], max_tokens: 16, system_prompt: None };
        let result = context.sample(params).await;
        assert!(matches!(result, Err(McpError::UnsupportedCapability(_))));
    }
}
