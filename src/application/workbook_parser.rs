// Parser seam for spreadsheet uploads
use serde_json::Value;

/// Extracts a structured snapshot payload from an uploaded workbook.
/// Cell-grid interpretation lives behind this seam; the upload service
/// accepts the parser's output as-is.
pub trait WorkbookParser: Send + Sync {
    fn parse(&self, filename: &str, bytes: &[u8]) -> anyhow::Result<Value>;
}
