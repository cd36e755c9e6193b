//! # Document Output
//!
//! The [`DocumentGenerator`] seam between the workflow layer and the
//! physical world, and its file-writing implementation. Documents are
//! rendered to text and written into the configured directory with
//! timestamped names; whatever print spooler or viewer watches that
//! directory is outside this system.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::folio::FolioInvoice;
use crate::invoice::SaleInvoice;
use crate::kot::KotTicket;

// =============================================================================
// Errors
// =============================================================================

/// Document generation failures.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("could not create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write document {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for document generation.
pub type PrintResult<T> = Result<T, PrintError>;

// =============================================================================
// Generator Seam
// =============================================================================

/// Produces the venue's documents. The service layer depends on this trait
/// so tests can record emissions instead of touching the filesystem.
pub trait DocumentGenerator: Send + Sync {
    /// Emits a kitchen ticket; returns where it landed.
    fn kot(&self, ticket: &KotTicket) -> PrintResult<PathBuf>;

    /// Emits a customer bill.
    fn invoice(&self, invoice: &SaleInvoice) -> PrintResult<PathBuf>;

    /// Emits a room-stay settlement.
    fn folio(&self, folio: &FolioInvoice) -> PrintResult<PathBuf>;
}

// =============================================================================
// File Sink
// =============================================================================

/// Output configuration for the file sink.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory the rendered documents are written into.
    pub directory: PathBuf,
}

impl OutputConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        OutputConfig {
            directory: directory.into(),
        }
    }
}

/// Writes rendered documents as text files named
/// `KOT_<label>_<hhmmss>.txt` / `Invoice_<label>_<hhmmss>.txt`.
#[derive(Debug, Clone)]
pub struct FileDocumentGenerator {
    config: OutputConfig,
}

impl FileDocumentGenerator {
    pub fn new(config: OutputConfig) -> Self {
        FileDocumentGenerator { config }
    }

    fn write(&self, file_name: &str, contents: &str) -> PrintResult<PathBuf> {
        fs::create_dir_all(&self.config.directory).map_err(|source| PrintError::CreateDir {
            path: self.config.directory.clone(),
            source,
        })?;

        let path = self.config.directory.join(file_name);
        fs::write(&path, contents).map_err(|source| PrintError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "document written");
        Ok(path)
    }
}

impl DocumentGenerator for FileDocumentGenerator {
    fn kot(&self, ticket: &KotTicket) -> PrintResult<PathBuf> {
        let name = format!(
            "KOT_{}_{}.txt",
            safe_token(&ticket.label),
            ticket.issued_at.format("%H%M%S")
        );
        self.write(&name, &ticket.render())
    }

    fn invoice(&self, invoice: &SaleInvoice) -> PrintResult<PathBuf> {
        let name = format!(
            "Invoice_{}_{}.txt",
            safe_token(&invoice.label),
            invoice.issued_at.format("%H%M%S")
        );
        self.write(&name, &invoice.render())
    }

    fn folio(&self, folio: &FolioInvoice) -> PrintResult<PathBuf> {
        let name = format!(
            "Invoice_Room{}_{}.txt",
            safe_token(&folio.room_number),
            folio.checked_out_at.format("%H%M%S")
        );
        self.write(&name, &folio.render())
    }
}

/// Makes a label safe for a file name (`TABLE T1` → `TABLE_T1`).
fn safe_token(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kot::KotLine;
    use chrono::{TimeZone, Utc};

    #[test]
    fn kot_lands_in_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let generator = FileDocumentGenerator::new(OutputConfig::new(dir.path()));

        let ticket = KotTicket::new(
            "TABLE T1",
            Utc.with_ymd_and_hms(2026, 3, 10, 18, 42, 5).unwrap(),
            vec![KotLine {
                quantity: 2,
                item_name: "Classic Burger".to_string(),
                note: String::new(),
            }],
        );

        let path = generator.kot(&ticket).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "KOT_TABLE_T1_184205.txt"
        );

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Classic Burger"));
    }

    #[test]
    fn output_directory_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("documents").join("today");
        let generator = FileDocumentGenerator::new(OutputConfig::new(&nested));

        let ticket = KotTicket::new(
            "TAKEOUT",
            Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
            vec![],
        );
        let path = generator.kot(&ticket).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
