//! SSE event formatting for `GET /mcp` (spec §4.8 stateful mode).
//! Grounded on the teacher's `SseEvent::format` (`turul-http-mcp-server/
//! src/sse.rs`): a named `message` event carrying one JSON-encoded
//! notification per frame, plus a comment-only keep-alive frame that
//! intentionally omits the `event:` line so proxies don't treat it as a
//! real message.

use mcp_server::SessionNotification;

pub fn format_notification(notification: &SessionNotification) -> String {
    let payload = serde_json::json!({
        "jsonrpc": "2.0",
        "method": notification.method,
        "params": notification.params,
    });
    format!("event: message\ndata: {payload}\n\n")
}

pub fn keep_alive() -> &'static str {
    ": keepalive\n\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_a_named_message_event() {
        let notification =
            SessionNotification { method: "notifications/progress".to_string(), params: serde_json::json!({"progress": 0.5}) };
        let formatted = format_notification(&notification);
        assert!(formatted.starts_with("event: message\ndata: "));
        assert!(formatted.contains("notifications/progress"));
        assert!(formatted.ends_with("\n\n"));
    }

    #[test]
    fn keep_alive_omits_the_event_line() {
        assert!(!keep_alive().contains("event:"));
        assert!(keep_alive().starts_with(':'));
    }
}
