use serde::{Deserialize, Serialize};

use crate::migrator::MigrationStats;
use crate::model::{ProjectType, StageType};

/// Outcome of one conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub input: String,
    pub output: String,
    pub workflows: Vec<WorkflowReport>,
    pub failures: Vec<ConversionFailure>,
    pub migration: MigrationStats,
}

impl ConversionReport {
    pub fn total_pipelines(&self) -> usize {
        self.workflows.len() + self.failures.len()
    }
}

/// A Jenkinsfile that was converted into a workflow file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowReport {
    /// Jenkinsfile path relative to the input root.
    pub source: String,
    /// Workflow path relative to the output root.
    pub workflow: String,
    pub project_type: ProjectType,
    pub stages: Vec<StageSummary>,
    pub jobs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    pub commands: usize,
}

/// A Jenkinsfile that could not be converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionFailure {
    pub source: String,
    pub error: String,
}
