//! Shared fakes and fixtures for integration tests

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use parking_lot::Mutex;
use pdf2audio::audio::write_wav;
use pdf2audio::document::PdfTextSource;
use pdf2audio::speech::{SpeechEngine, VoiceCatalog, VoiceList, VoiceSettings};
use pdf2audio::{Pdf2AudioError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What a [`FakeEngine`] was asked to do
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    Speak {
        text: String,
        settings: VoiceSettings,
    },
    Render {
        text: String,
        settings: VoiceSettings,
        path: PathBuf,
    },
}

/// Speech engine that records calls and writes one sample per character
#[derive(Clone)]
pub struct FakeEngine {
    voices: VoiceList,
    calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl FakeEngine {
    pub fn new(voices: VoiceList) -> Self {
        Self {
            voices,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new(VoiceList::speakers(2))
    }
}

impl SpeechEngine for FakeEngine {
    fn voices(&self) -> &dyn VoiceCatalog {
        &self.voices
    }

    fn speak(&mut self, text: &str, settings: &VoiceSettings) -> Result<()> {
        self.calls.lock().push(EngineCall::Speak {
            text: text.to_string(),
            settings: settings.clone(),
        });
        Ok(())
    }

    fn render_to_file(&mut self, text: &str, settings: &VoiceSettings, path: &Path) -> Result<()> {
        self.calls.lock().push(EngineCall::Render {
            text: text.to_string(),
            settings: settings.clone(),
            path: path.to_path_buf(),
        });
        let samples = vec![0.0f32; text.chars().count()];
        write_wav(path, &samples, 16000)
    }
}

/// In-memory text source
pub struct FakeSource {
    pages: Vec<Result<String>>,
}

impl FakeSource {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| Ok(p.to_string())).collect(),
        }
    }

    /// A source whose page at `index` fails to extract
    pub fn failing_at(pages: &[&str], index: usize) -> Self {
        let mut source = Self::new(pages);
        source.pages[index] = Err(Pdf2AudioError::PdfError(format!(
            "Failed to extract text from page {}: broken content stream",
            index + 1
        )));
        source
    }
}

impl PdfTextSource for FakeSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.pages[index].clone()
    }
}

/// Write a PDF with one page per entry, each showing the given text
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("save pdf");
}
