//! Integration tests for `#[derive(Prompt)]` — static and dynamic
//! forms, matching scenario S4 (weather_report) plus a dynamic variant.

use mcp_derive::Prompt;
use serde::Deserialize;

#[derive(Prompt, Deserialize)]
#[prompt(name = "weather_report", template = "Generate a {style} weather report for {location}.")]
struct WeatherReportPrompt {
    location: String,
    style: String,
}

#[derive(Prompt, Deserialize)]
#[prompt(name = "summary", dynamic = true)]
struct SummaryPrompt {
    topic: String,
}

impl SummaryPrompt {
    async fn render(&self) -> mcp_protocol::McpResult<String> {
        Ok(format!("Summarize {}", self.topic))
    }
}

#[tokio::test]
async fn static_template_renders_scenario_s4() {
    let prompt = WeatherReportPrompt::into_built_prompt();

    let mut args = std::collections::HashMap::new();
    args.insert("location".to_string(), serde_json::Value::String("Paris".into()));
    args.insert("style".to_string(), serde_json::Value::String("formal".into()));

    let result = prompt.resolve(args).await.unwrap();
    let mcp_protocol::ContentBlock::Text { text } = &result.messages[0].content else {
        panic!("expected text content");
    };
    assert!(text.contains("Paris") && text.contains("formal"));
}

#[tokio::test]
async fn dynamic_prompt_calls_the_authored_render() {
    let prompt = SummaryPrompt::into_built_prompt();

    let mut args = std::collections::HashMap::new();
    args.insert("topic".to_string(), serde_json::Value::String("Rust ownership".into()));

    let result = prompt.resolve(args).await.unwrap();
    let mcp_protocol::ContentBlock::Text { text } = &result.messages[0].content else {
        panic!("expected text content");
    };
    assert_eq!(text, "Summarize Rust ownership");
}
