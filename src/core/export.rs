// SnapSleuth - core/export.rs
//
// CSV and JSON export of snapshot elements.
// Core layer: writes to any Write trait object.

use crate::core::model::Element;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Output format of an export, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Detect the format from `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn check_count(elements: &[&Element]) -> Result<(), ExportError> {
    if elements.len() > constants::MAX_EXPORT_ELEMENTS {
        return Err(ExportError::TooManyElements {
            count: elements.len(),
            max: constants::MAX_EXPORT_ELEMENTS,
        });
    }
    Ok(())
}

/// Export elements to CSV format.
///
/// Writes: uid, type, text, description, url, line
pub fn export_csv<W: Write>(
    elements: &[&Element],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_count(elements)?;

    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["uid", "type", "text", "description", "url", "line"])
        .map_err(csv_err)?;

    for element in elements {
        let line = element.line_number.to_string();
        csv_writer
            .write_record([
                element.uid.as_str(),
                element.element_type.as_str(),
                element.text.as_str(),
                element.description.as_str(),
                element.url.as_str(),
                line.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(elements.len())
}

/// Export elements to JSON format (array of objects).
pub fn export_json<W: Write>(
    elements: &[&Element],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_count(elements)?;
    serde_json::to_writer_pretty(writer, elements).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(elements.len())
}

/// Create `path` and export `elements` in the format its extension names.
pub fn export_to_file(elements: &[&Element], path: &Path) -> Result<usize, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);

    let count = match format {
        ExportFormat::Csv => export_csv(elements, writer, path)?,
        ExportFormat::Json => export_json(elements, writer, path)?,
    };

    tracing::info!(path = %path.display(), elements = count, "Export complete");
    Ok(count)
}
