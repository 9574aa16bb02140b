//! Jenkinsfile parsing: stages, their `sh` steps, tools and project type.
//!
//! Parsing never fails. Text that does not look like a pipeline simply
//! produces a model without stages.

mod lexer;
mod project;
mod stages;

use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classifier::classify;
use crate::model::{PipelineModel, StageInfo};

pub use project::{detect_project, relative_path};

static JAVA_TOOL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)jdk|java").unwrap());

/// Parses a Jenkinsfile located at `pipeline_file` inside `input_root`.
///
/// The project type is taken from marker files next to the Jenkinsfile.
pub fn parse(source: &str, pipeline_file: &Path, input_root: &Path) -> PipelineModel {
    let project_dir = pipeline_file.parent().unwrap_or(input_root);
    let (project_type, working_directory) = detect_project(project_dir, input_root);

    PipelineModel {
        project_type,
        working_directory,
        ..parse_text(source)
    }
}

/// Parses Jenkinsfile text without looking at the filesystem.
pub fn parse_text(source: &str) -> PipelineModel {
    let tokens = lexer::tokenize(source);

    let stages = stages::extract_stages(&tokens)
        .into_iter()
        .map(|raw| StageInfo {
            stage_type: classify(&raw.name),
            name: raw.name,
            commands: raw.commands,
        })
        .collect();

    PipelineModel {
        stages,
        tools: detect_tools(source),
        ..PipelineModel::default()
    }
}

fn detect_tools(source: &str) -> BTreeSet<String> {
    let mut tools = BTreeSet::new();
    if JAVA_TOOL_PATTERN.is_match(source) {
        tools.insert("java".to_string());
    }
    tools
}
