/*!
 * Document rendering.
 *
 * Renderers consume a [`StructuredDocument`] and persist it, keeping section
 * and content order exactly as given.
 */

use std::path::{Path, PathBuf};

use crate::errors::RenderError;
use crate::script::StructuredDocument;

pub mod docx;

pub use self::docx::DocxRenderer;

/// Writes a structured document to `output`, optionally based on a template.
pub trait DocumentRenderer: Send + Sync {
    /// Render and return the written path
    fn render(
        &self,
        document: &StructuredDocument,
        template: Option<&Path>,
        output: &Path,
    ) -> Result<PathBuf, RenderError>;
}
