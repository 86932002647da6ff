//! Output rendering
//!
//! Renders arbitrary response bodies into one of three textual formats
//! without knowing the domain meaning of the fields. Rendering never fails:
//! unexpected shapes degrade to a compact string form.

pub mod table;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Text emitted for an empty result list in table and plain formats.
pub const NO_RESULTS: &str = "No results";

/// Fields projected onto a plain-format line, in fixed order.
const PRIMARY_FIELDS: [&str; 5] = ["id", "name", "title", "email", "slug"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
    Plain,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "plain" => Ok(OutputFormat::Plain),
            _ => Err("expected json, table, or plain".to_string()),
        }
    }
}

/// Render a response body in the requested format.
pub fn render(data: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => render_json(data),
        OutputFormat::Table => render_table(data),
        OutputFormat::Plain => render_plain(data),
    }
}

/// Pretty serialization, key order kept as received from the server.
fn render_json(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

fn render_table(data: &Value) -> String {
    match data {
        Value::Array(items) if items.is_empty() => NO_RESULTS.to_string(),
        Value::Array(items) => table::render_list(items),
        Value::Object(_) => table::render_object(data),
        other => table::cell_text(other),
    }
}

/// One item per line, primary fields joined by whitespace, for piping into
/// line-oriented tools.
fn render_plain(data: &Value) -> String {
    match data {
        Value::Array(items) if items.is_empty() => NO_RESULTS.to_string(),
        Value::Array(items) => items
            .iter()
            .map(plain_line)
            .collect::<Vec<_>>()
            .join("\n"),
        other => plain_line(other),
    }
}

fn plain_line(item: &Value) -> String {
    match item {
        Value::Object(obj) => {
            let fields: Vec<String> = PRIMARY_FIELDS
                .iter()
                .filter_map(|key| obj.get(*key))
                .filter(|value| !value.is_null())
                .map(table::cell_text)
                .collect();
            if fields.is_empty() {
                item.to_string()
            } else {
                fields.join(" ")
            }
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_list_per_format() {
        let empty = json!([]);
        assert_eq!(render(&empty, OutputFormat::Table), NO_RESULTS);
        assert_eq!(render(&empty, OutputFormat::Plain), NO_RESULTS);
        assert_eq!(render(&empty, OutputFormat::Json), "[]");
    }

    #[test]
    fn test_json_preserves_key_order_as_received() {
        let data: Value =
            serde_json::from_str(r#"{"zebra": 1, "alpha": 2, "middle": 3}"#).unwrap();
        let rendered = render(&data, OutputFormat::Json);

        let zebra = rendered.find("zebra").unwrap();
        let alpha = rendered.find("alpha").unwrap();
        let middle = rendered.find("middle").unwrap();
        assert!(zebra < alpha && alpha < middle);
    }

    #[test]
    fn test_json_output_is_pretty() {
        let data = json!([{"id": "1"}]);
        let rendered = render(&data, OutputFormat::Json);
        assert!(rendered.contains('\n'));
        assert_eq!(
            serde_json::from_str::<Value>(&rendered).unwrap(),
            data,
            "json output must round-trip"
        );
    }

    #[test]
    fn test_plain_projects_primary_fields() {
        let data = json!([
            {"id": "p1", "title": "Getting started", "content": {"big": "blob"}},
            {"id": "p2", "title": "Roadmap"}
        ]);
        let rendered = render(&data, OutputFormat::Plain);
        assert_eq!(rendered, "p1 Getting started\np2 Roadmap");
    }

    #[test]
    fn test_plain_skips_null_primary_fields() {
        let data = json!([{"id": "p1", "name": null, "title": "Only title"}]);
        assert_eq!(render(&data, OutputFormat::Plain), "p1 Only title");
    }

    #[test]
    fn test_plain_scalars_one_per_line() {
        let data = json!(["alpha", "beta"]);
        assert_eq!(render(&data, OutputFormat::Plain), "alpha\nbeta");
    }

    #[test]
    fn test_plain_degrades_to_compact_json_without_primary_fields() {
        let data = json!([{"count": 7}]);
        assert_eq!(render(&data, OutputFormat::Plain), r#"{"count":7}"#);
    }

    #[test]
    fn test_plain_single_object_is_one_line() {
        let data = json!({"id": "u1", "email": "ada@example.com"});
        assert_eq!(render(&data, OutputFormat::Plain), "u1 ada@example.com");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!(
            "plain".parse::<OutputFormat>().unwrap(),
            OutputFormat::Plain
        );
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_never_fails_on_odd_shapes() {
        assert_eq!(render(&Value::Null, OutputFormat::Table), "");
        assert_eq!(render(&json!(42), OutputFormat::Plain), "42");
        assert_eq!(render(&json!("bare"), OutputFormat::Table), "bare");
    }
}
