use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?, options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value, options: table::TableOptions) -> anyhow::Result<String> {
    match value {
        Value::Array(items) => Ok(render_array_table(items, options)),
        Value::Object(map) => {
            if let Some(rendered) = render_listing(map, options) {
                return Ok(rendered);
            }
            let mut entries = map.iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_rows(&["key", "value"], &rows, options))
        }
        scalar => Ok(table::render_rows(
            &["value"],
            &[vec![value_to_cell(scalar)]],
            options,
        )),
    }
}

/// Listing views and page responses carry a `state` tag. Results become a
/// row table; every other state prints its user-facing message.
fn render_listing(map: &Map<String, Value>, options: table::TableOptions) -> Option<String> {
    let listing = match map.get("listing") {
        Some(Value::Object(inner)) => inner,
        _ => map,
    };
    let state = listing.get("state")?.as_str()?;

    let mut out = Vec::new();
    if let Some(Value::String(title)) = map.get("title") {
        out.push(format!("== {title} =="));
    }
    match state {
        "results" => {
            let items = listing.get("items")?.as_array()?;
            out.push(render_array_table(items, options));
            let total = listing
                .get("total")
                .and_then(Value::as_u64)
                .and_then(|total| usize::try_from(total).ok())
                .unwrap_or(0);
            if total > items.len() {
                out.push(format!(
                    "Showing {} of {total} matches; raise --limit to see more.",
                    items.len()
                ));
            }
        }
        "failed" => {
            let message = listing
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Failed to load data.");
            out.push(message.to_string());
        }
        "no_results" => out.push(String::from("No results match the current filters.")),
        "loading" => out.push(String::from("Loading...")),
        _ => return None,
    }
    Some(out.join("\n"))
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return String::from("(no columns)");
    }
    // Keep `id` and `name` leading, the rest alphabetical.
    headers.sort_by_key(|header| (column_rank(header), header.clone()));

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_rows(&header_refs, &rows, options)
}

fn column_rank(header: &str) -> u8 {
    match header {
        "id" => 0,
        "name" | "title" => 1,
        _ => 2,
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(values) if values.iter().all(Value::is_string) => values
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{render, render_table, table::TableOptions};
    use crate::cli::OutputFormat;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn listing_results_render_as_rows() {
        let value = json!({
            "state": "results",
            "items": [
                {"name": "Kos Melati", "id": "k1", "facilities": ["WiFi", "AC"]},
                {"name": "Homestay Indah", "id": "k2", "facilities": []}
            ]
        });
        let out = render_table(&value, PLAIN).unwrap();
        let header = out.lines().next().unwrap();
        assert!(header.starts_with("id"));
        assert!(header.find("name").unwrap() < header.find("facilities").unwrap());
        assert!(out.contains("WiFi, AC"));
        assert!(!out.contains("state"));
    }

    #[test]
    fn cut_listing_reports_total() {
        let value = json!({
            "state": "results",
            "items": [{"id": "k1", "name": "Kos Melati"}],
            "total": 25
        });
        let out = render_table(&value, PLAIN).unwrap();
        assert!(out.contains("Kos Melati"));
        assert!(out.ends_with("Showing 1 of 25 matches; raise --limit to see more."));

        let whole = render_table(
            &json!({"state": "results", "items": [{"id": "k1"}], "total": 1}),
            PLAIN,
        )
        .unwrap();
        assert!(!whole.contains("Showing"));
    }

    #[test]
    fn listing_states_render_messages() {
        let empty = render_table(&json!({"state": "no_results"}), PLAIN).unwrap();
        assert_eq!(empty, "No results match the current filters.");

        let failed = render_table(
            &json!({"state": "failed", "message": "Failed to load kos listings."}),
            PLAIN,
        )
        .unwrap();
        assert_eq!(failed, "Failed to load kos listings.");
    }

    #[test]
    fn page_with_nested_listing_gets_title() {
        let value = json!({
            "title": "Kursus",
            "listing": {"state": "no_results"}
        });
        let out = render_table(&value, PLAIN).unwrap();
        assert_eq!(out, "== Kursus ==\nNo results match the current filters.");
    }

    #[test]
    fn plain_objects_render_as_key_value() {
        let out = render_table(&json!({"b": 2, "a": null}), PLAIN).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].starts_with('a'));
        assert!(lines[3].starts_with('b'));
    }
}
