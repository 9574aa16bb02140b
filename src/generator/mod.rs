//! Builds GitHub Actions workflow documents from parsed pipelines.

mod generic;
mod maven;

use crate::document::Document;
use crate::error::{ConvertError, Result};
use crate::mapping;
use crate::model::{PipelineModel, ProjectType};

pub const DEFAULT_RUNTIME_VERSIONS: [&str; 2] = ["17", "21"];
pub const DEFAULT_RUNNER: &str = "ubuntu-latest";

const WORKFLOW_NAME: &str = "CI/CD Pipeline";
const PUSH_BRANCHES: [&str; 2] = ["main", "develop"];
const PULL_REQUEST_BRANCHES: [&str; 1] = ["main"];

/// Settings shared by every workflow generated in one run.
///
/// Always holds at least one runtime version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    runtime_versions: Vec<String>,
    runner: String,
}

impl WorkflowConfig {
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] if no runtime version is given, or if a
    /// version or the runner label is blank.
    pub fn new(runtime_versions: Vec<String>, runner: impl Into<String>) -> Result<Self> {
        let runner = runner.into();

        if runtime_versions.is_empty() {
            return Err(ConvertError::Config(
                "at least one Java version is required".into(),
            ));
        }
        if runtime_versions.iter().any(|v| v.trim().is_empty()) {
            return Err(ConvertError::Config("Java versions must not be blank".into()));
        }
        if runner.trim().is_empty() {
            return Err(ConvertError::Config("runner label must not be blank".into()));
        }

        Ok(Self {
            runtime_versions,
            runner,
        })
    }

    pub fn runtime_versions(&self) -> &[String] {
        &self.runtime_versions
    }

    /// The last configured version; artifacts are uploaded from its matrix leg.
    pub fn latest_runtime(&self) -> &str {
        self.runtime_versions.last().map_or("", String::as_str)
    }

    pub fn runner(&self) -> &str {
        &self.runner
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            runtime_versions: DEFAULT_RUNTIME_VERSIONS.iter().map(ToString::to_string).collect(),
            runner: DEFAULT_RUNNER.to_string(),
        }
    }
}

/// Generates the workflow document for one pipeline.
pub fn generate(model: &PipelineModel, config: &WorkflowConfig) -> Document {
    let jobs = match model.project_type {
        ProjectType::Maven => maven::jobs(model, config),
        ProjectType::Generic | ProjectType::Gradle | ProjectType::Node => {
            generic::jobs(model, config)
        }
    };

    mapping! {
        "name" => WORKFLOW_NAME,
        "on" => mapping! {
            "push" => mapping! { "branches" => PUSH_BRANCHES.to_vec() },
            "pull_request" => mapping! { "branches" => PULL_REQUEST_BRANCHES.to_vec() },
        },
        "jobs" => jobs,
    }
}

/// Names of the jobs in a generated workflow, in order.
pub fn job_names(workflow: &Document) -> Vec<String> {
    workflow
        .get("jobs")
        .and_then(Document::as_mapping)
        .map(|jobs| jobs.keys().cloned().collect())
        .unwrap_or_default()
}

fn checkout_step() -> Document {
    mapping! {
        "name" => "Checkout code",
        "uses" => "actions/checkout@v4",
    }
}

/// Adds `working-directory` to every step whose `run` command satisfies `needs_dir`.
fn apply_working_directory(
    steps: &mut [Document],
    working_directory: Option<&str>,
    needs_dir: impl Fn(&str) -> bool,
) {
    let Some(dir) = working_directory else {
        return;
    };

    for step in steps.iter_mut().filter_map(Document::as_mapping_mut) {
        let wants_dir = step
            .get("run")
            .and_then(Document::as_str)
            .is_some_and(&needs_dir);
        if wants_dir {
            step.insert("working-directory".to_string(), Document::from(dir));
        }
    }
}
