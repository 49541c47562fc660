/// Colorized JSON rendering for terminals.
use crossterm::style::Stylize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Render `value` as 2-space indented JSON with ANSI colors.
///
/// Layout matches `serde_json::to_string_pretty` once the color codes are removed.
#[must_use]
pub fn to_colored_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".dark_grey().to_string()),
        Value::Bool(b) => out.push_str(&b.to_string().yellow().to_string()),
        Value::Number(n) => out.push_str(&n.to_string().cyan().to_string()),
        Value::String(s) => out.push_str(&quote(s).green().to_string()),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                open_entry(out, i, depth + 1);
                write_value(out, item, depth + 1);
            }
            close(out, depth, ']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                open_entry(out, i, depth + 1);
                out.push_str(&quote(key).blue().bold().to_string());
                out.push_str(": ");
                write_value(out, item, depth + 1);
            }
            close(out, depth, '}');
        }
    }
}

fn open_entry(out: &mut String, index: usize, depth: usize) {
    if index > 0 {
        out.push(',');
    }
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
}

fn close(out: &mut String, depth: usize, bracket: char) {
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
    out.push(bracket);
}

/// JSON string literal with escapes.
fn quote(s: &str) -> String {
    Value::from(s).to_string()
}
