/*!
 * Tests for pipeline orchestration
 */

use video2script::app_config::{Config, ProcessingMode, SegmentationConfig};
use video2script::providers::mock::MockProvider;
use video2script::script::{
    generator_for, CannedScriptGenerator, RemoteOptimizer, ScriptGenerator, ScriptPipeline,
};
use crate::common::SAMPLE_TRANSCRIPT;

/// Settings packing each sample sentence into its own segment
fn per_sentence_settings() -> SegmentationConfig {
    SegmentationConfig {
        max_text_length: 8,
        ..SegmentationConfig::default()
    }
}

#[tokio::test]
async fn test_process_withPassthrough_shouldStructureRawTranscript() {
    let pipeline = ScriptPipeline::passthrough(per_sentence_settings());

    let document = pipeline.process(SAMPLE_TRANSCRIPT).await;

    assert_eq!(document.title, "技能操作培训脚本");
    assert_eq!(document.section_titles(), vec!["主要内容", "首先", "第一步", "第二步"]);
    assert_eq!(document.sections[3].content, vec!["第二步设置参数。", "操作完成后关闭设备。"]);
}

#[tokio::test]
async fn test_process_withDefaultBound_shouldKeepShortTranscriptInOneSegment() {
    let pipeline = ScriptPipeline::passthrough(SegmentationConfig::default());

    let document = pipeline.process(SAMPLE_TRANSCRIPT).await;

    // One segment; "第一步" precedes "首先" in the default cue list
    assert_eq!(document.sections.len(), 1);
    assert_eq!(document.sections[0].title, "第一步");
    assert_eq!(document.sections[0].content.len(), 1);
}

#[tokio::test]
async fn test_process_withFailingOptimizer_shouldStructureOriginalText() {
    let optimizer = RemoteOptimizer::new(MockProvider::failing(), "mock-model");
    let pipeline = ScriptPipeline::new(Box::new(optimizer), per_sentence_settings());
    let reference = ScriptPipeline::passthrough(per_sentence_settings());

    let document = pipeline.process(SAMPLE_TRANSCRIPT).await;

    assert_eq!(document, reference.structure(SAMPLE_TRANSCRIPT));
}

#[tokio::test]
async fn test_process_withWorkingOptimizer_shouldStructureRewrittenText() {
    let provider = MockProvider::working()
        .with_custom_response(|_| "首先检查设备。最后关闭电源。".to_string());
    let pipeline = ScriptPipeline::new(
        Box::new(RemoteOptimizer::new(provider, "mock-model")),
        per_sentence_settings(),
    );

    let document = pipeline.process(SAMPLE_TRANSCRIPT).await;

    assert_eq!(document.section_titles(), vec!["首先", "最后"]);
}

#[test]
fn test_structure_withEmptyText_shouldReturnZeroSections() {
    let pipeline = ScriptPipeline::passthrough(SegmentationConfig::default());

    assert!(pipeline.structure("").is_empty());
    assert!(pipeline.structure("   。。 ").is_empty());
}

#[test]
fn test_structure_withCustomTitles_shouldUseConfiguredTitles() {
    let settings = SegmentationConfig {
        document_title: "设备手册".to_string(),
        default_chapter_title: "概述".to_string(),
        cue_phrases: Vec::new(),
        ..SegmentationConfig::default()
    };
    let pipeline = ScriptPipeline::passthrough(settings);

    let document = pipeline.structure(SAMPLE_TRANSCRIPT);

    assert_eq!(document.title, "设备手册");
    assert_eq!(document.section_titles(), vec!["概述"]);
}

#[tokio::test]
async fn test_cannedGenerator_shouldIgnoreInput() {
    let document = CannedScriptGenerator.generate("任意内容").await;

    assert_eq!(document, CannedScriptGenerator::document());
    assert_eq!(document.sections.len(), 6);
    assert_eq!(document.sections[0].title, "培训目标");
}

#[tokio::test]
async fn test_generatorFor_shouldPickImplementationByMode() {
    let config = Config::default();

    assert_eq!(generator_for(&config, ProcessingMode::Mock).name(), "mock");
    assert_eq!(generator_for(&config, ProcessingMode::Passthrough).name(), "passthrough");
    assert_eq!(generator_for(&config, ProcessingMode::Remote).name(), "remote");
}
