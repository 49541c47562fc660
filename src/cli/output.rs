/// Output formatting: colored/plain JSON, key listings, errors. TTY detection.
use std::io::{IsTerminal, Write};

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;
use serde_json::Value;

use super::args::OutputFormat;
use super::color::to_colored_json;
use crate::records::{PeekError, Record, STATE_SORT_KEY};
use crate::types::{ErrorOutput, SortKeyOutput};

/// Resolve the effective output format, handling `--no-color` and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, no_color: bool) -> OutputFormat {
    if no_color {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Color
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    /// When true, print step timing to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, no_color: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, no_color),
            debug,
        }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

// --- Records ---

/// Render a record in the context's format.
///
/// # Errors
///
/// Returns `PeekError::Render` if serialization fails.
pub fn render_record(record: &Record, format: OutputFormat) -> Result<String, PeekError> {
    let render_err = |e: serde_json::Error| PeekError::Render(e.to_string());
    match format {
        OutputFormat::Color | OutputFormat::Auto => {
            Ok(to_colored_json(&Value::Object(record.clone())))
        }
        OutputFormat::Json => serde_json::to_string_pretty(record).map_err(render_err),
        OutputFormat::Compact => serde_json::to_string(record).map_err(render_err),
    }
}

/// Write a record to stdout.
///
/// # Errors
///
/// Returns `PeekError::Render` if serialization fails.
pub fn write_record(record: &Record, ctx: &OutputCtx) -> Result<(), PeekError> {
    let rendered = render_record(record, ctx.format)?;
    println!("{rendered}");
    Ok(())
}

// --- Sort keys ---

/// Write an ordered sort-key list to stdout.
///
/// # Errors
///
/// Returns `PeekError::Render` if serialization fails.
pub fn write_sort_keys(keys: &[String], ctx: &OutputCtx) -> Result<(), PeekError> {
    let rows: Vec<SortKeyOutput> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| SortKeyOutput {
            position: i + 1,
            sort_key: key.clone(),
            state: key.contains(STATE_SORT_KEY),
        })
        .collect();

    match ctx.format {
        OutputFormat::Color | OutputFormat::Auto => {
            write_sort_keys_table(&rows);
            Ok(())
        }
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Compact => print_compact_json(&rows),
    }
}

fn write_sort_keys_table(rows: &[SortKeyOutput]) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(["#", "SORT KEY", "STATE"]);
    for row in rows {
        table.add_row([
            Cell::new(row.position),
            Cell::new(&row.sort_key),
            Cell::new(if row.state { "✓" } else { "" }),
        ]);
    }
    println!("{table}");
}

// --- Error output ---

/// Format an error for stderr in the requested output format.
#[must_use]
pub fn render_error(err: &PeekError, format: OutputFormat) -> String {
    let envelope = ErrorOutput::from_peek_error(err);
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&envelope).unwrap_or_default(),
        OutputFormat::Compact => serde_json::to_string(&envelope).unwrap_or_default(),
        OutputFormat::Color | OutputFormat::Auto => format!("Error: {err}"),
    }
}

/// Write a structured error to stderr.
pub fn write_error(err: &PeekError, format: OutputFormat, no_color: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    let _ = writeln!(out, "{}", render_error(err, resolve_format(format, no_color)));
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), PeekError> {
    let s = serde_json::to_string_pretty(value).map_err(|e| PeekError::Render(e.to_string()))?;
    println!("{s}");
    Ok(())
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) -> Result<(), PeekError> {
    let s = serde_json::to_string(value).map_err(|e| PeekError::Render(e.to_string()))?;
    println!("{s}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record() -> Record {
        match json!({"_pk": "quote/1", "amount": 3}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn explicit_formats_are_kept() {
        assert_eq!(resolve_format(OutputFormat::Compact, false), OutputFormat::Compact);
        assert_eq!(resolve_format(OutputFormat::Color, true), OutputFormat::Json);
    }

    #[test]
    fn plain_json_is_two_space_indented() {
        let out = render_record(&record(), OutputFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"_pk\": \"quote/1\",\n  \"amount\": 3\n}");
    }

    #[test]
    fn compact_json_is_one_line() {
        let out = render_record(&record(), OutputFormat::Compact).unwrap();
        assert_eq!(out, r#"{"_pk":"quote/1","amount":3}"#);
    }

    #[test]
    fn compact_error_is_one_line() {
        let err = PeekError::MissingAccount;
        let out = render_error(&err, OutputFormat::Compact);
        assert!(!out.contains('\n'));
        assert!(out.starts_with(r#"{"ok":false,"error":{"code":"missing_account""#));
    }

    #[test]
    fn error_formats_follow_output_format() {
        let err = PeekError::MissingAccount;
        assert!(render_error(&err, OutputFormat::Json).contains("\n  \"error\": {"));
        assert_eq!(
            render_error(&err, OutputFormat::Color),
            "Error: No account number found in the caller identity response"
        );
    }

    #[test]
    fn empty_record_renders() {
        assert_eq!(render_record(&Record::new(), OutputFormat::Json).unwrap(), "{}");
    }
}
