//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, PhishguardArgs};
use crate::error::Result;

/// Output a result in the selected format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &PhishguardArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &PhishguardArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print_value(&value, 0);
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PhishguardArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Print a JSON value as indented key/value lines.
fn print_value(value: &serde_json::Value, indent: usize) {
    let spaces = "  ".repeat(indent);
    match value {
        serde_json::Value::Object(object) => {
            for (key, nested) in object {
                match nested {
                    serde_json::Value::Object(_) => {
                        println!("{spaces}{key}:");
                        print_value(nested, indent + 1);
                    }
                    _ => {
                        let formatted = format_scalar(nested);
                        println!("{spaces}{key}: {formatted}");
                    }
                }
            }
        }
        _ => {
            let formatted = format_scalar(value);
            println!("{spaces}{formatted}");
        }
    }
}

/// Format a scalar-ish JSON value for display.
fn format_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Number(number) => number.to_string(),
        serde_json::Value::Bool(boolean) => boolean.to_string(),
        serde_json::Value::Array(items) => {
            let joined = items
                .iter()
                .map(format_scalar)
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{joined}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scalar() {
        assert_eq!(
            format_scalar(&serde_json::Value::String("test".to_string())),
            "test"
        );
        assert_eq!(
            format_scalar(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_scalar(&serde_json::Value::Bool(false)), "false");
        assert_eq!(format_scalar(&serde_json::Value::Null), "null");
        assert_eq!(format_scalar(&serde_json::json!([1, -1])), "[1, -1]");
    }
}
