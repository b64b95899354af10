use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::{Config, ProcessingMode};
use crate::file_utils::{FileManager, FileType};
use crate::render::{DocumentRenderer, DocxRenderer};
use crate::script::{generator_for, ScriptGenerator, StructuredDocument};
use crate::transcription::{transcriber_for, Transcriber};

// @module: Application controller for video-to-script processing

// @const: Output name suffixes
const SCRIPT_SUFFIX: &str = "培训脚本";
const STRUCTURE_SUFFIX: &str = "结构化内容";

/// Files produced for one input
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The generated script
    pub document: StructuredDocument,
    /// JSON backup, if enabled
    pub json_path: Option<PathBuf>,
    /// Rendered document, `None` when there was nothing to render
    pub docx_path: Option<PathBuf>,
}

/// Counters for a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    /// Includes `collisions`
    pub skipped: usize,
    pub failed: usize,
    /// Inputs whose output name was already taken by another input of the batch
    pub collisions: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Mode resolved at construction
    mode: ProcessingMode,
    transcriber: Box<dyn Transcriber>,
    generator: Box<dyn ScriptGenerator>,
    renderer: Box<dyn DocumentRenderer>,
}

impl Controller {
    /// Create a controller whose collaborators follow the configured mode
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let mode = config.effective_mode();
        info!("Processing mode: {}", mode.display_name());

        let transcriber = transcriber_for(&config, mode);
        let generator = generator_for(&config, mode);
        Ok(Self::with_components(config, mode, transcriber, generator, Box::new(DocxRenderer::new())))
    }

    /// Create a controller from explicit collaborators
    pub fn with_components(
        config: Config,
        mode: ProcessingMode,
        transcriber: Box<dyn Transcriber>,
        generator: Box<dyn ScriptGenerator>,
        renderer: Box<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            config,
            mode,
            transcriber,
            generator,
            renderer,
        }
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output paths for `input_file`: (json, docx)
    pub fn output_paths(&self, input_file: &Path) -> (PathBuf, PathBuf) {
        let output_dir = &self.config.output.output_dir;
        (
            FileManager::generate_output_path(input_file, output_dir, STRUCTURE_SUFFIX, "json"),
            FileManager::generate_output_path(input_file, output_dir, SCRIPT_SUFFIX, "docx"),
        )
    }

    /// Transcribe and structure one input, without writing anything
    pub async fn build_script(&self, input_file: &Path) -> Result<StructuredDocument> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let transcript = if FileManager::detect_file_type(input_file) == FileType::Transcript {
            debug!("Reading transcript directly from {:?}", input_file);
            FileManager::read_to_string(input_file)?
        } else {
            info!("Transcribing {:?} with the {} transcriber...", input_file, self.transcriber.name());
            self.transcriber
                .transcribe(input_file)
                .await
                .with_context(|| format!("Transcription failed for {:?}", input_file))?
        };
        debug!("Transcript length: {} characters", transcript.chars().count());

        Ok(self.generator.generate(&transcript).await)
    }

    /// Run the whole workflow for one input file.
    ///
    /// Returns `None` when the outputs already exist and `force_overwrite` is off.
    pub async fn run(&self, input_file: &Path, force_overwrite: bool) -> Result<Option<RunOutput>> {
        let start_time = Instant::now();
        let (json_path, docx_path) = self.output_paths(input_file);

        if docx_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, {:?} already exists (use -f to force overwrite)", input_file, docx_path);
            return Ok(None);
        }

        FileManager::ensure_dir(&self.config.output.output_dir)?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message(format!("Processing {}", input_file.display()));

        let result = self.build_script(input_file).await;
        spinner.finish_and_clear();
        let document = result?;

        let json_path = if self.config.output.save_json {
            match document.save_json(&json_path) {
                Ok(()) => {
                    info!("Structured content saved to: {:?}", json_path);
                    Some(json_path)
                }
                Err(e) => {
                    // The backup is best-effort
                    warn!("Failed to save structured content: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let docx_path = if document.is_empty() {
            warn!("No content found in {:?}, nothing to render", input_file);
            None
        } else {
            let written = self.renderer
                .render(&document, self.config.output.template_path.as_deref(), &docx_path)
                .with_context(|| format!("Document export failed for {:?}", input_file))?;
            Some(written)
        };

        info!(
            "{:?}: {} sections, {} lines in {:.1}s",
            input_file,
            document.sections.len(),
            document.line_count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Some(RunOutput {
            document,
            json_path,
            docx_path,
        }))
    }

    /// Run every supported input below `input_dir`; failures are logged and counted
    pub async fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<BatchSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_input_files(input_dir)?;
        if files.is_empty() {
            warn!("No video, audio or transcript files found in {:?}", input_dir);
            return Ok(BatchSummary::default());
        }
        info!("Found {} input file(s) in {:?}", files.len(), input_dir);

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut summary = BatchSummary::default();
        // Output script path -> input that claimed it in this batch
        let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();
        for file in &files {
            progress.set_message(file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());

            let (_, docx_path) = self.output_paths(file);
            if let Some(first) = claimed.get(&docx_path) {
                warn!(
                    "Skipping {:?}, its output {:?} is already produced by {:?} (same file stem)",
                    file, docx_path, first
                );
                summary.skipped += 1;
                summary.collisions += 1;
                progress.inc(1);
                continue;
            }
            claimed.insert(docx_path, file);

            match self.run(file, force_overwrite).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "Finished: {} processed, {} skipped ({} name collisions), {} failed",
            summary.processed, summary.skipped, summary.collisions, summary.failed
        );
        Ok(summary)
    }
}
