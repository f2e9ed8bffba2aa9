// Sidelog - core/export.rs
//
// CSV and JSON export of the currently retained entries.
// Core layer: writes to any Write trait object; the window menu supplies
// the file via an rfd save dialog.

use crate::core::model::LogEntry;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export entries to CSV format.
///
/// Writes: seq, time, level, message. Returns the number of rows written.
pub fn export_csv<W: Write>(
    entries: &[LogEntry],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["seq", "time", "level", "message"])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for entry in entries {
        csv_writer
            .write_record([
                &entry.seq.to_string(),
                &entry.time,
                &entry.level,
                &entry.message,
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export entries to JSON format (array of objects).
pub fn export_json<W: Write>(
    entries: &[LogEntry],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, entries).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_entry(seq: u64, message: &str) -> LogEntry {
        LogEntry::new(
            seq,
            "10:00:00".to_string(),
            "ERROR".to_string(),
            message.to_string(),
        )
    }

    #[test]
    fn test_csv_export() {
        let entries = vec![make_entry(0, "Error one"), make_entry(1, "Error two")];
        let mut buf = Vec::new();
        let count = export_csv(&entries, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("seq,time,level,message"));
        assert!(output.contains("Error one"));
        assert!(output.contains("Error two"));
    }

    #[test]
    fn test_json_export() {
        let entries = vec![make_entry(0, "Test message")];
        let mut buf = Vec::new();
        let count = export_json(&entries, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("Test message"));
        assert!(output.contains("\"level\": \"ERROR\""));
    }

    #[test]
    fn test_csv_preserves_commas_in_messages() {
        let entries = vec![make_entry(0, "a, b, and c")];
        let mut buf = Vec::new();
        export_csv(&entries, &mut buf, &PathBuf::from("out.csv")).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("\"a, b, and c\""));
    }
}
