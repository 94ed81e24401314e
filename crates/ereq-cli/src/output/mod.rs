use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;
mod views;

/// Responses that know which columns to show in `--format table`.
pub trait Tabular {
    fn headers(&self) -> Vec<&'static str>;
    fn rows(&self) -> Vec<Vec<String>>;
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_object_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Like [`render`], but tables use the response's own columns.
pub fn render_tabular<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            let rows = value.rows();
            if rows.is_empty() {
                return Ok(String::from("(no rows)"));
            }
            Ok(table::render_table(&value.headers(), &rows, table_options()))
        }
        OutputFormat::Json | OutputFormat::Raw => render(value, format),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

pub fn output_tabular<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_tabular(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Two-column key/value table of a response's top-level fields.
fn render_object_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let rows = match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| vec![key, value_to_cell(&value)])
            .collect::<Vec<_>>(),
        scalar => vec![vec![String::from("value"), value_to_cell(&scalar)]],
    };
    Ok(table::render_table(&["key", "value"], &rows, table_options()))
}

pub(crate) fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::{Tabular, render, render_tabular};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        programme: &'static str,
        filled: u32,
        note: Option<String>,
    }

    impl Tabular for Example {
        fn headers(&self) -> Vec<&'static str> {
            vec!["programme", "filled"]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            vec![vec![self.programme.to_string(), self.filled.to_string()]]
        }
    }

    fn example() -> Example {
        Example {
            programme: "Law",
            filled: 3,
            note: None,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&example(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["programme"], "Law");
        assert_eq!(parsed["filled"], 3);
        assert!(parsed["note"].is_null());
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&example(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn object_table_lists_fields() {
        let out = render(&example(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("key")));
        assert!(out.contains("programme  Law"));
        assert!(out.contains("note       -"));
    }

    #[test]
    fn tabular_table_uses_own_columns() {
        let out = render_tabular(&example(), OutputFormat::Table).expect("table render should work");
        let first = out.lines().next().unwrap_or_default();
        assert_eq!(first, "programme  filled");
        assert!(!out.contains("note"));
    }

    #[test]
    fn tabular_json_is_unchanged() {
        let out = render_tabular(&example(), OutputFormat::Raw).expect("raw render should work");
        assert!(out.contains("\"note\":null"));
    }
}
