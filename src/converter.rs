//! Drives a whole run: find Jenkinsfiles, write one workflow per file, copy the tree.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::document::Document;
use crate::emitter::to_yaml;
use crate::error::{ConvertError, Result};
use crate::generator::{self, WorkflowConfig};
use crate::migrator::TreeMigrator;
use crate::model::PipelineModel;
use crate::output::PhaseProgress;
use crate::parser::{self, relative_path};
use crate::report::{ConversionFailure, ConversionReport, StageSummary, WorkflowReport};

/// File names recognised as Jenkins pipeline definitions.
pub const PIPELINE_FILE_NAMES: [&str; 3] = ["Jenkinsfile", "jenkinsfile", "Jenkinsfile.groovy"];

const WORKFLOWS_DIR: &str = ".github/workflows";

pub struct Converter {
    input: PathBuf,
    output: PathBuf,
    config: WorkflowConfig,
}

impl Converter {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, config: WorkflowConfig) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config,
        }
    }

    /// Directory the generated workflow files are written to.
    pub fn workflows_dir(&self) -> PathBuf {
        self.output.join(WORKFLOWS_DIR)
    }

    /// Converts every Jenkinsfile below the input root and copies the project tree.
    ///
    /// A Jenkinsfile that cannot be read or decoded is recorded in the report
    /// and does not stop the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is missing or not a directory, or if the
    /// output tree cannot be written.
    pub fn convert(&self) -> Result<ConversionReport> {
        let input_root = validate_input(&self.input)?;

        fs::create_dir_all(self.workflows_dir())?;
        let output_root = self.output.canonicalize()?;
        let workflows_dir = output_root.join(WORKFLOWS_DIR);

        info!(
            "Converting {} into {}",
            input_root.display(),
            output_root.display()
        );

        let progress = PhaseProgress::start_discovery();
        let pipeline_files = find_pipeline_files(&input_root, &output_root);
        if pipeline_files.is_empty() {
            warn!("No Jenkinsfiles found in {}", input_root.display());
        }

        let progress = progress.finish_discovery_start_conversion(pipeline_files.len());
        let mut names = WorkflowNames::default();
        let mut workflows = Vec::new();
        let mut failures = Vec::new();

        for pipeline_file in &pipeline_files {
            let source = relative_path(pipeline_file, &input_root);
            info!("Processing {source}");

            let (model, workflow) = match self.convert_pipeline(pipeline_file, &input_root) {
                Ok(converted) => converted,
                Err(err) => {
                    error!("Skipping {source}: {err}");
                    failures.push(ConversionFailure {
                        source,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            let name = names.claim(workflow_name(Path::new(&source)));
            let destination = workflows_dir.join(format!("{name}.yml"));
            fs::write(&destination, to_yaml(&workflow))?;
            info!("Generated workflow: {}", destination.display());

            workflows.push(WorkflowReport {
                source,
                workflow: format!("{WORKFLOWS_DIR}/{name}.yml"),
                project_type: model.project_type,
                stages: model
                    .stages
                    .iter()
                    .map(|stage| StageSummary {
                        name: stage.name.clone(),
                        stage_type: stage.stage_type,
                        commands: stage.commands.len(),
                    })
                    .collect(),
                jobs: generator::job_names(&workflow),
            });
        }

        let progress = progress.finish_conversion_start_copy(workflows.len());
        let migration = TreeMigrator::new(&input_root, &output_root).migrate()?;
        progress.finish_copy(migration.files_copied);

        Ok(ConversionReport {
            input: input_root.display().to_string(),
            output: output_root.display().to_string(),
            workflows,
            failures,
            migration,
        })
    }

    fn convert_pipeline(
        &self,
        pipeline_file: &Path,
        input_root: &Path,
    ) -> Result<(PipelineModel, Document)> {
        let bytes = fs::read(pipeline_file)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| ConvertError::Encoding(pipeline_file.to_path_buf()))?;
        let source = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let model = parser::parse(source, pipeline_file, input_root);
        debug!(
            "Parsed {} stage(s) from {}, project type {}",
            model.stages.len(),
            pipeline_file.display(),
            model.project_type
        );

        let workflow = generator::generate(&model, &self.config);
        Ok((model, workflow))
    }
}

fn validate_input(input: &Path) -> Result<PathBuf> {
    if !input.exists() {
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }
    if !input.is_dir() {
        return Err(ConvertError::InputNotDirectory(input.to_path_buf()));
    }
    Ok(input.canonicalize()?)
}

/// Jenkinsfiles below `input_root`, sorted by path.
///
/// Skips `.git*` directories and the output tree when it lives inside the input.
fn find_pipeline_files(input_root: &Path, output_root: &Path) -> Vec<PathBuf> {
    let output_inside_input = output_root != input_root && output_root.starts_with(input_root);
    let skip = |entry: &DirEntry| {
        (entry.depth() > 0 && entry.file_type().is_dir() && is_git_dir(entry))
            || (output_inside_input && entry.path().starts_with(output_root))
    };

    let mut files: Vec<PathBuf> = WalkDir::new(input_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !skip(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.path().is_file() && is_pipeline_file(entry))
        .map(DirEntry::into_path)
        .collect();

    files.sort();
    debug!("Found {} pipeline file(s)", files.len());
    files
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with(".git")
}

fn is_pipeline_file(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    PIPELINE_FILE_NAMES.contains(&name.as_ref())
}

/// Workflow file stem for a Jenkinsfile given relative to the input root.
///
/// `ci` for a root Jenkinsfile, otherwise `ci-<parent directory>` lowercased
/// with spaces turned into dashes.
pub fn workflow_name(relative_pipeline_file: &Path) -> String {
    let parent = relative_pipeline_file
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().to_lowercase().replace(' ', "-"));

    match parent {
        Some(dir) if !dir.is_empty() => format!("ci-{dir}"),
        _ => "ci".to_string(),
    }
}

/// Hands out unique workflow names within one run.
#[derive(Debug, Default)]
struct WorkflowNames {
    taken: HashSet<String>,
}

impl WorkflowNames {
    fn claim(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }

        let mut suffix = 2;
        loop {
            let candidate = format!("{base}-{suffix}");
            if self.taken.insert(candidate.clone()) {
                warn!("Workflow name {base} already used, writing {candidate} instead");
                return candidate;
            }
            suffix += 1;
        }
    }
}
