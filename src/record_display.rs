use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use serde_json::{Map, Value};

/// Renders one airport record as a two column field/value table.
///
/// The record is the unwrapped text the client returns, so it is not always
/// valid JSON (a multi element answer unwraps to `{..},{..}`). Returns `None`
/// when the text is not a single JSON object.
pub fn record_table(record: &str) -> Option<Table> {
    let fields = match serde_json::from_str::<Value>(record.trim()) {
        Ok(Value::Object(fields)) => fields,
        _ => return None,
    };
    Some(fields_table(&fields))
}

fn fields_table(fields: &Map<String, Value>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Field").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    for (key, value) in fields {
        table.add_row(vec![key.clone(), format_value(value)]);
    }
    table
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "NULL".to_string(),
        v => v.to_string(),
    }
}
