use crate::results::ResultEntry;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export file '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
}

const CSV_HEADER: [&str; 4] = ["Rank", "Method", "URL", "Status Code"];

/// Write rows as CSV and return how many records were written
pub fn export_csv<'a, W: Write>(
    entries: impl IntoIterator<Item = &'a ResultEntry>,
    writer: W,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    let mut count = 0;
    for entry in entries {
        csv_writer.write_record([
            entry.rank.to_string().as_str(),
            entry.method.as_str(),
            entry.url.as_str(),
            entry.status_code.to_string().as_str(),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

pub fn export_csv_to_path<'a>(
    entries: impl IntoIterator<Item = &'a ResultEntry>,
    path: &Path,
) -> Result<usize, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.display().to_string(),
        source,
    })?;
    let count = export_csv(entries, file)?;
    tracing::info!(path = %path.display(), rows = count, "Exported results to CSV");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_header_and_rows() {
        let entries = vec![
            ResultEntry::new(1, "GET", "https://a.test/", 200),
            ResultEntry::new(2, "POST", "https://a.test/q?a=1,b=\"2\"", 500),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&entries, &mut buf).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Rank,Method,URL,Status Code"));
        assert_eq!(lines.next(), Some("1,GET,https://a.test/,200"));
        assert_eq!(
            lines.next(),
            Some("2,POST,\"https://a.test/q?a=1,b=\"\"2\"\"\",500")
        );
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let mut buf = Vec::new();
        let count = export_csv(std::iter::empty(), &mut buf).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap(), "Rank,Method,URL,Status Code\n");
    }
}
