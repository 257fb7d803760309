// Workbook parser producing a metadata-level payload
use crate::application::workbook_parser::WorkbookParser;
use chrono::Utc;
use serde_json::{json, Value};

/// Accepts a workbook and returns a structured payload describing the file
/// rather than its cell contents. Cell-level extraction is handled by the
/// spreadsheet collaborator once the durable store integration lands; this
/// keeps spreadsheet uploads flowing through the same version pipeline as
/// JSON in the meantime.
#[derive(Debug, Clone, Default)]
pub struct MetadataWorkbookParser;

impl WorkbookParser for MetadataWorkbookParser {
    fn parse(&self, filename: &str, bytes: &[u8]) -> anyhow::Result<Value> {
        if bytes.is_empty() {
            anyhow::bail!("workbook is empty");
        }

        Ok(json!({
            "message": "Workbook received; cell-level extraction pending integration",
            "filename": filename,
            "size": bytes.len(),
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }
}
