//! Integration tests for `#[derive(Router)]` / `#[derive(Skill)]` —
//! both bundle already-declared names rather than carrying a handler of
//! their own (spec §4.5, scenario S5).

use mcp_derive::{Router, Skill};

#[derive(Router)]
#[router(name = "billing", description = "Billing operations", tools = ["charge", "refund"])]
struct BillingRouter;

#[derive(Skill)]
#[skill(name = "weather_analysis", description = "Bundles weather tools and resources",
        tools = ["get_weather", "get_forecast", "analyze_climate"],
        resources = ["weather://current", "weather://historical"])]
struct WeatherAnalysisSkill;

#[test]
fn router_definition_carries_its_bundled_tool_names() {
    let router = BillingRouter::into_router_definition();
    assert_eq!(router.name, "billing");
    assert_eq!(router.tool_names, vec!["charge".to_string(), "refund".to_string()]);
    assert_eq!(router.namespaced_alias("charge"), "billing__charge");
}

#[test]
fn skill_definition_bundles_tools_and_resources_scenario_s5() {
    let skill = WeatherAnalysisSkill::into_skill_definition();
    assert_eq!(skill.tool_names.len(), 3);
    assert_eq!(skill.resource_uris.len(), 2);
    assert_eq!(skill.resource_uri(), "skill://weather_analysis");
    assert!(skill.render_markdown().contains("get_weather"));
}
