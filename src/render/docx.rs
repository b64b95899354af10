use chrono::{DateTime, Local};
use docx_rs::{read_docx, AlignmentType, Docx, Paragraph, Run, Style, StyleType};
use log::{info, warn};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::errors::RenderError;
use crate::file_utils::FileManager;
use crate::script::StructuredDocument;

use super::DocumentRenderer;

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading1";

/// Writes a structured document as a Word (.docx) file.
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    /// Fixed generation time, `None` means "now"
    generated_at: Option<DateTime<Local>>,
}

impl DocxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp documents with `generated_at` instead of the current time
    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Blank document with the title and heading styles defined
    pub fn default_document() -> Docx {
        Docx::new()
            .add_style(
                Style::new(TITLE_STYLE, StyleType::Paragraph)
                    .name("Title")
                    .size(44)
                    .bold(),
            )
            .add_style(
                Style::new(HEADING_STYLE, StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
    }

    /// Template document, or the default one when it is missing or unreadable
    fn base_document(&self, template: Option<&Path>) -> Docx {
        let Some(path) = template else {
            return Self::default_document();
        };

        if !FileManager::file_exists(path) {
            warn!("Template not found at {:?}, using the default layout", path);
            return Self::default_document();
        }

        match std::fs::read(path).map_err(|e| e.to_string()).and_then(|bytes| {
            read_docx(&bytes).map_err(|e| e.to_string())
        }) {
            Ok(docx) => docx,
            Err(e) => {
                warn!("Failed to load template {:?}: {}, using the default layout", path, e);
                Self::default_document()
            }
        }
    }

    fn text(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    /// Append the script content to `docx`, in document order
    pub fn apply_structure(&self, docx: Docx, document: &StructuredDocument) -> Docx {
        let now = self.generated_at.unwrap_or_else(Local::now);

        let mut docx = docx
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(&document.title))
                    .style(TITLE_STYLE)
                    .align(AlignmentType::Center),
            )
            .add_paragraph(Self::text(&format!("生成日期：{}", now.format("%Y年%m月%d日"))))
            .add_paragraph(Self::text(&format!("生成时间：{}", now.format("%H:%M:%S"))))
            .add_paragraph(Self::text("文档类型：自动生成的培训脚本"))
            .add_paragraph(Paragraph::new());

        for section in &document.sections {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(&section.title))
                    .style(HEADING_STYLE),
            );
            for line in &section.content {
                docx = docx.add_paragraph(Self::text(line));
            }
            docx = docx.add_paragraph(Paragraph::new());
        }

        docx
    }
}

impl DocumentRenderer for DocxRenderer {
    fn render(
        &self,
        document: &StructuredDocument,
        template: Option<&Path>,
        output: &Path,
    ) -> Result<PathBuf, RenderError> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let docx = self.apply_structure(self.base_document(template), document);
        let file = File::create(output)?;
        docx.build()
            .pack(file)
            .map_err(|e| RenderError::Write(e.to_string()))?;

        info!("Document saved to: {:?}", output);
        Ok(output.to_path_buf())
    }
}
