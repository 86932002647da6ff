use comfy_table::{presets, Cell, Table};
use serde_json::Value;

/// Render a list of objects as a fixed-width table. The first item's keys
/// define the columns in their original order; keys missing in later rows
/// render empty. Columns take their max content width, nothing is truncated.
pub fn render_list(items: &[Value]) -> String {
    let Some(first) = items.first() else {
        return String::new();
    };

    let Some(first_obj) = first.as_object() else {
        // List of scalars: a single unnamed column.
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_header(vec!["value"]);
        for item in items {
            table.add_row(vec![Cell::new(cell_text(item))]);
        }
        return table.to_string();
    };

    let columns: Vec<String> = first_obj.keys().cloned().collect();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(columns.iter().map(Cell::new).collect::<Vec<_>>());

    for item in items {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| match item.get(column) {
                Some(value) => Cell::new(cell_text(value)),
                None => Cell::new(""),
            })
            .collect();
        table.add_row(cells);
    }

    table.to_string()
}

/// Render a single object as a two-column key/value listing.
pub fn render_object(value: &Value) -> String {
    let Some(obj) = value.as_object() else {
        return cell_text(value);
    };

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);

    for (key, val) in obj {
        table.add_row(vec![Cell::new(key), Cell::new(cell_text(val))]);
    }

    table.to_string()
}

/// Stringify a cell value: scalars as themselves, nested structures
/// flattened to compact one-line JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
