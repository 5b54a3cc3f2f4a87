//! PDF documents as a text source for speech

pub mod converter;
pub mod source;

pub use converter::{check_document_path, DocumentConverter};
pub use source::{LopdfSource, PdfTextSource};
