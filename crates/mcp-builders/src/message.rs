//! Prompt template grammar (spec §6.3, testable property 6):
//! `{{name}}` is substituted first, then `{name}`; a variable missing
//! from the argument map is left as a literal placeholder — a
//! deliberate debugging signal, never an error.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static DOUBLE_BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").unwrap());
static SINGLE_BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

pub fn render_template(template: &str, args: &HashMap<String, Value>) -> String {
    let after_double = DOUBLE_BRACE.replace_all(template, |caps: &regex::Captures| {
        substitute_or_preserve(&caps[0], &caps[1], args)
    });
    let after_single = SINGLE_BRACE.replace_all(&after_double, |caps: &regex::Captures| {
        substitute_or_preserve(&caps[0], &caps[1], args)
    });
    after_single.into_owned()
}

fn substitute_or_preserve(whole_match: &str, var_name: &str, args: &HashMap<String, Value>) -> String {
    match args.get(var_name) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => whole_match.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), Value::String(v.to_string()))).collect()
    }

    #[test]
    fn both_brace_styles_substitute_in_order() {
        let rendered = render_template("{a} and {{b}}", &args(&[("a", "x"), ("b", "y")]));
        assert_eq!(rendered, "x and y");
    }

    #[test]
    fn missing_variable_preserved_literally() {
        let rendered = render_template("Hello {name}!", &HashMap::new());
        assert_eq!(rendered, "Hello {name}!");
    }

    #[test]
    fn weather_report_scenario_s4() {
        let rendered = render_template(
            "Generate a {style} weather report for {location}.",
            &args(&[("location", "Paris"), ("style", "formal")]),
        );
        assert!(rendered.contains("Paris"));
        assert!(rendered.contains("formal"));
    }
}
