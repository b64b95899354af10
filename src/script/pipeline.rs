/*!
 * Transcript-to-script pipeline.
 *
 * `optimize -> split -> pack -> assemble`, strictly in sequence. Only the
 * optimizer touches the network, and its failures are absorbed there.
 */

use async_trait::async_trait;
use log::{debug, info};

use crate::app_config::{Config, ProcessingMode, SegmentationConfig};

use super::assembler::StructureAssembler;
use super::chapters::ChapterDetector;
use super::document::{Chapter, StructuredDocument};
use super::optimizer::{PassthroughOptimizer, RemoteOptimizer, TextOptimizer};
use super::packer::pack_segments;
use super::splitter::split_sentences;

/// Anything able to turn a transcript into a structured script.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Produce the script for `raw_text`
    async fn generate(&self, raw_text: &str) -> StructuredDocument;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// The full optimize/split/pack/assemble pipeline.
pub struct ScriptPipeline {
    optimizer: Box<dyn TextOptimizer>,
    settings: SegmentationConfig,
    assembler: StructureAssembler,
}

impl ScriptPipeline {
    /// Create a pipeline around an optimizer
    pub fn new(optimizer: Box<dyn TextOptimizer>, settings: SegmentationConfig) -> Self {
        let detector = ChapterDetector::with_window(settings.cue_phrases.clone(), settings.cue_window_chars);
        let assembler = StructureAssembler::new(
            detector,
            settings.document_title.clone(),
            settings.default_chapter_title.clone(),
        );
        Self {
            optimizer,
            settings,
            assembler,
        }
    }

    /// Pipeline that structures the transcript without rewriting it
    pub fn passthrough(settings: SegmentationConfig) -> Self {
        Self::new(Box::new(PassthroughOptimizer), settings)
    }

    pub fn settings(&self) -> &SegmentationConfig {
        &self.settings
    }

    /// Run every stage on `raw_text`
    pub async fn process(&self, raw_text: &str) -> StructuredDocument {
        info!("Optimizing transcript with the {} optimizer...", self.optimizer.name());
        let outcome = self.optimizer.optimize(raw_text).await;
        if outcome.is_fallback() {
            debug!("Continuing with the original transcript");
        }

        info!("Analyzing script structure...");
        self.structure(&outcome.into_text())
    }

    /// Split, pack and assemble `text`; the synchronous half of [`ScriptPipeline::process`]
    pub fn structure(&self, text: &str) -> StructuredDocument {
        let sentences = split_sentences(text, &self.settings.sentence_delimiters);
        let segments = pack_segments(&sentences, self.settings.max_text_length, &self.settings.terminator);
        debug!("{} sentences packed into {} segments", sentences.len(), segments.len());

        let document = self.assembler.assemble(segments);
        debug!("Detected sections: {:?}", document.section_titles());
        document
    }
}

#[async_trait]
impl ScriptGenerator for ScriptPipeline {
    async fn generate(&self, raw_text: &str) -> StructuredDocument {
        self.process(raw_text).await
    }

    fn name(&self) -> &str {
        self.optimizer.name()
    }
}

/// Offline generator returning a fixed sample script, whatever the input.
#[derive(Debug, Clone, Default)]
pub struct CannedScriptGenerator;

impl CannedScriptGenerator {
    /// The sample training script
    pub fn document() -> StructuredDocument {
        let chapter = |title: &str, lines: &[&str]| {
            Chapter::new(title, lines.iter().map(|l| l.to_string()).collect())
        };

        StructuredDocument::new(
            "技能操作培训脚本",
            vec![
                chapter("培训目标", &[
                    "通过本次培训，学员将掌握设备的基本操作方法和安全注意事项。",
                    "了解设备的主要组成部分和功能特点。",
                ]),
                chapter("设备介绍", &[
                    "设备主要由三个部分组成：控制面板、操作区域和安全装置。",
                    "控制面板位于设备正面，包含各种操作按钮和状态指示灯。",
                    "操作区域是进行实际工作的区域，需要特别注意安全。",
                ]),
                chapter("安全要求", &[
                    "操作前必须穿戴安全帽、防护眼镜和防护手套。",
                    "确保工作区域清洁，无杂物阻碍操作。",
                    "严格按照操作规程执行，不得违规操作。",
                ]),
                chapter("操作步骤", &[
                    "第一步：打开电源开关，检查设备状态指示灯。",
                    "第二步：根据工作需求设置操作参数。",
                    "第三步：按照标准流程进行操作。",
                    "第四步：操作完成后，按正确顺序关闭设备。",
                ]),
                chapter("注意事项", &[
                    "操作过程中如发现异常，立即停止操作并报告。",
                    "定期检查设备状态，确保设备正常运行。",
                    "保持工作区域整洁，及时清理杂物。",
                ]),
                chapter("总结", &[
                    "本次培训介绍了设备的基本操作方法和安全要求。",
                    "请学员在实际工作中严格按照培训内容执行。",
                    "如有疑问，请及时咨询相关技术人员。",
                ]),
            ],
        )
    }
}

#[async_trait]
impl ScriptGenerator for CannedScriptGenerator {
    async fn generate(&self, _raw_text: &str) -> StructuredDocument {
        Self::document()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Pick the generator for `mode`
pub fn generator_for(config: &Config, mode: ProcessingMode) -> Box<dyn ScriptGenerator> {
    let settings = config.segmentation.clone();
    match mode {
        ProcessingMode::Remote => Box::new(ScriptPipeline::new(
            Box::new(RemoteOptimizer::from_config(&config.optimizer)),
            settings,
        )),
        ProcessingMode::Passthrough => Box::new(ScriptPipeline::passthrough(settings)),
        ProcessingMode::Mock => Box::new(CannedScriptGenerator),
    }
}
