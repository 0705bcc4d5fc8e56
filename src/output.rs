//! Rendering and writing of the summary document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use serde_json::json;
use tracing::debug;

use crate::summary::Summary;

/// Renders a [`Summary`] as two-space-indented JSON with a trailing newline.
pub fn render(summary: &Summary) -> String {
    match serde_json::to_string_pretty(summary) {
        Ok(mut text) => {
            text.push('\n');
            text
        }
        // summaries only hold strings and finite numbers
        Err(e) => error_document(&e.to_string()),
    }
}

/// A single-key `{"error": ...}` document for failures outside [`Summary`].
pub fn error_document(message: &str) -> String {
    format!("{}\n", json!({ "error": message }))
}

/// Writes a rendered document to any writer and flushes it.
pub fn write_to<W: Write>(writer: W, document: &str) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes a rendered document to standard output.
pub fn print(document: &str) -> Result<()> {
    write_to(std::io::stdout().lock(), document)
}

/// Writes a rendered document to `path`, replacing any existing file.
pub fn write_file(path: &Path, document: &str) -> Result<()> {
    debug!(path = %path.display(), "Writing summary file");
    write_to(File::create(path)?, document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::ValueSummary;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_uses_two_space_indent() {
        let summary = Summary::Value(ValueSummary {
            total_value: 20.0,
            average_value: 5.0,
            count_entries_with_value: 2,
        });

        assert_eq!(
            render(&summary),
            "{\n  \"total_value\": 20.0,\n  \"average_value\": 5.0,\n  \"count_entries_with_value\": 2\n}\n"
        );
    }

    #[test]
    fn test_error_document_escapes_as_json() {
        let text = error_document("bad \u{1b} \"quote\"");

        assert_eq!(text, "{\"error\":\"bad \\u001b \\\"quote\\\"\"}\n");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["error"], "bad \u{1b} \"quote\"");
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buf = Vec::new();
        write_to(&mut buf, "{}\n").unwrap();
        assert_eq!(buf, b"{}\n");
    }

    #[test]
    fn test_write_file_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        write_file(&path, "first\n").unwrap();
        write_file(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }
}
