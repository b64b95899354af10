/*!
 * Transcript structuring.
 *
 * Turns a raw transcript into a titled, sectioned training script:
 *
 * - `splitter`: sentence splitting on sentence-final punctuation
 * - `packer`: greedy packing of sentences into size-bounded segments
 * - `chapters`: cue-phrase detection in a segment's leading window
 * - `assembler`: fold of segments into chapters
 * - `optimizer`: best-effort rewriting through a language model
 * - `pipeline`: the whole sequence, plus the offline canned generator
 * - `document`: the structured document and its JSON form
 */

pub mod assembler;
pub mod chapters;
pub mod document;
pub mod optimizer;
pub mod packer;
pub mod pipeline;
pub mod splitter;

pub use self::assembler::{assemble, AssemblyState, StructureAssembler};
pub use self::chapters::{detect_chapter_start, ChapterDetector};
pub use self::document::{Chapter, StructuredDocument};
pub use self::optimizer::{OptimizationOutcome, PassthroughOptimizer, RemoteOptimizer, TextOptimizer};
pub use self::packer::pack_segments;
pub use self::pipeline::{generator_for, CannedScriptGenerator, ScriptGenerator, ScriptPipeline};
pub use self::splitter::split_sentences;
