// ── Recursive pretty printer ──
//
// Renders nested operational data for human display: one tab per
// nesting level, `- ` items for sequences, `key:` lines for mappings.
// Display-only; no parsing round-trip is guaranteed.

use std::fmt::Write as _;

use serde_json::Value;

/// Render a value tree as an indented, tab-prefixed multi-line string.
pub fn pretty_print(value: &Value, depth: usize) -> String {
    let tab = "\t".repeat(depth);
    match value {
        Value::Array(items) => {
            let mut out = String::from("\n");
            for item in items {
                let _ = writeln!(out, "{tab}- {}", pretty_print(item, depth + 1));
            }
            out
        }
        Value::Object(entries) => {
            let mut out = String::new();
            for (key, child) in entries {
                let _ = write!(out, "\n{tab}{key}: {}", pretty_print(child, depth + 1));
            }
            out
        }
        // Bare string form, not the quoted JSON form.
        Value::String(text) => text.clone(),
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn mapping_with_sequence() {
        let rendered = pretty_print(&json!({"a": [1, 2]}), 0);
        assert_eq!(rendered, "\na: \n\t- 1\n\t- 2\n");
    }

    #[test]
    fn scalars_render_in_string_form() {
        assert_eq!(pretty_print(&json!("up"), 0), "up");
        assert_eq!(pretty_print(&json!(42), 0), "42");
        assert_eq!(pretty_print(&json!(true), 0), "true");
    }

    #[test]
    fn nested_mappings_indent_per_level() {
        let rendered = pretty_print(
            &json!({"GigabitEthernet0/0": {"is_up": true, "speed": 1000}}),
            0,
        );
        assert_eq!(
            rendered,
            "\nGigabitEthernet0/0: \n\tis_up: true\n\tspeed: 1000"
        );
    }
}
