use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Build ecosystem detected from the marker files next to a Jenkinsfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Generic,
    Maven,
    Gradle,
    Node,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Generic => "generic",
            Self::Maven => "maven",
            Self::Gradle => "gradle",
            Self::Node => "node",
        };
        f.write_str(label)
    }
}

/// Semantic category of a pipeline stage, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageType {
    #[default]
    Build,
    Test,
    Deliver,
    Security,
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Build => "build",
            Self::Test => "test",
            Self::Deliver => "deliver",
            Self::Security => "security",
        };
        f.write_str(label)
    }
}

/// A single `stage('...')` block found in a Jenkinsfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    pub commands: Vec<String>,
}

/// Everything the generator needs to know about one Jenkinsfile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineModel {
    pub stages: Vec<StageInfo>,
    pub tools: BTreeSet<String>,
    pub triggers: Vec<String>,
    pub project_type: ProjectType,
    pub working_directory: Option<String>,
}

impl PipelineModel {
    pub fn has_stage_of_type(&self, stage_type: StageType) -> bool {
        self.stages.iter().any(|stage| stage.stage_type == stage_type)
    }
}
