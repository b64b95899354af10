/*!
 * Assembly of segments into chapters.
 *
 * Assembly is a left fold over the segments. The state carries the chapter
 * currently being filled and the chapters already closed; each step consumes
 * the state and returns the next one.
 */

use crate::app_config::SegmentationConfig;

use super::chapters::ChapterDetector;
use super::document::{Chapter, StructuredDocument};

/// Fold state: the open chapter and the closed sections before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyState {
    /// Chapter receiving segments
    pub open: Chapter,

    /// Closed chapters, never empty
    pub completed: Vec<Chapter>,
}

impl AssemblyState {
    /// Initial state: an empty chapter under the default title
    pub fn new(default_chapter_title: &str) -> Self {
        Self {
            open: Chapter::empty(default_chapter_title),
            completed: Vec::new(),
        }
    }

    /// Feed one segment with the cue detected at its start.
    ///
    /// A cue closes the open chapter only if it already holds content. A cue
    /// seen while the open chapter is still empty renames it instead, so the
    /// document never starts with an empty default chapter.
    pub fn step(self, segment: String, cue: Option<&str>) -> Self {
        let AssemblyState { mut open, mut completed } = self;

        match cue {
            Some(cue) if !open.is_empty() => {
                completed.push(open);
                open = Chapter::new(cue, vec![segment]);
            }
            Some(cue) => {
                open.title = cue.to_string();
                open.content.push(segment);
            }
            None => open.content.push(segment),
        }

        Self { open, completed }
    }

    /// Close the fold, keeping the open chapter only if it has content
    pub fn finish(self) -> Vec<Chapter> {
        let AssemblyState { open, mut completed } = self;
        if !open.is_empty() {
            completed.push(open);
        }
        completed
    }
}

/// Builds a [`StructuredDocument`] from packed segments.
#[derive(Debug, Clone)]
pub struct StructureAssembler {
    detector: ChapterDetector,
    document_title: String,
    default_chapter_title: String,
}

impl StructureAssembler {
    pub fn new(
        detector: ChapterDetector,
        document_title: impl Into<String>,
        default_chapter_title: impl Into<String>,
    ) -> Self {
        Self {
            detector,
            document_title: document_title.into(),
            default_chapter_title: default_chapter_title.into(),
        }
    }

    pub fn detector(&self) -> &ChapterDetector {
        &self.detector
    }

    /// Fold `segments` into titled sections, preserving their order
    pub fn assemble<I>(&self, segments: I) -> StructuredDocument
    where
        I: IntoIterator<Item = String>,
    {
        let sections = segments
            .into_iter()
            .fold(AssemblyState::new(&self.default_chapter_title), |state, segment| {
                let cue = self.detector.detect(&segment);
                state.step(segment, cue)
            })
            .finish();

        StructuredDocument::new(self.document_title.clone(), sections)
    }
}

/// Assemble with the default titles and the default 50-character window.
pub fn assemble<S: AsRef<str>>(segments: &[S], cues: &[String]) -> StructuredDocument {
    let defaults = SegmentationConfig::default();
    let assembler = StructureAssembler::new(
        ChapterDetector::new(cues.to_vec()),
        defaults.document_title,
        defaults.default_chapter_title,
    );
    assembler.assemble(segments.iter().map(|s| s.as_ref().to_string()))
}
