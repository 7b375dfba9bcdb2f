// src/utils/upload.rs

use std::path::Path;

use rand::Rng;
use tracing::{info, warn};

use crate::error::AppError;

/// Multipart field carrying the PDF.
pub const PDF_FIELD: &str = "pdfFile";

const PDF_MIME: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Accepts the part only when it is declared as a PDF and looks like one.
pub fn ensure_pdf(content_type: Option<&str>, bytes: &[u8]) -> Result<(), AppError> {
    let declared = content_type
        .map(|ct| ct.split(';').next().unwrap_or_default().trim())
        .is_some_and(|ct| ct.eq_ignore_ascii_case(PDF_MIME));

    if !declared || !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::BadRequest("Only PDF files are allowed!".to_string()));
    }
    Ok(())
}

/// Name under which an upload is stored, e.g. `pdfFile-1714091000123-123456789.pdf`.
pub fn stored_file_name() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{PDF_FIELD}-{millis}-{suffix}.pdf")
}

/// Writes the PDF into `dir` and returns the stored file name.
pub async fn save_pdf(dir: &Path, bytes: &[u8]) -> Result<String, AppError> {
    tokio::fs::create_dir_all(dir).await?;

    let file_name = stored_file_name();
    tokio::fs::write(dir.join(&file_name), bytes).await?;

    info!(file = %file_name, size = bytes.len(), "pdf stored");
    Ok(file_name)
}

/// Removes an upload that no quiz ended up referencing.
pub async fn discard_pdf(dir: &Path, file_name: &str) {
    if let Err(e) = tokio::fs::remove_file(dir.join(file_name)).await {
        warn!(file = %file_name, "could not remove orphaned upload: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_declared_pdf_with_magic() {
        assert!(ensure_pdf(Some("application/pdf"), b"%PDF-1.7 ...").is_ok());
        assert!(ensure_pdf(Some("Application/PDF; charset=binary"), b"%PDF-1.4").is_ok());
    }

    #[test]
    fn rejects_wrong_type_or_content() {
        assert!(ensure_pdf(Some("text/plain"), b"%PDF-1.7").is_err());
        assert!(ensure_pdf(None, b"%PDF-1.7").is_err());
        assert!(ensure_pdf(Some("application/pdf"), b"hello").is_err());
    }

    #[test]
    fn stored_name_follows_field_prefix() {
        let name = stored_file_name();
        assert!(name.starts_with("pdfFile-"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.matches('-').count(), 2);
    }
}
