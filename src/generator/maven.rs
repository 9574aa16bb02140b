use crate::document::{Document, Mapping};
use crate::mapping;
use crate::model::{PipelineModel, StageType};

use super::{apply_working_directory, checkout_step, WorkflowConfig};

const BUILD_JOB: &str = "build-and-test";
const DELIVER_JOB: &str = "deliver";
const SECURITY_JOB: &str = "security-scan";
const JAR_ARTIFACT: &str = "jar-artifact";
const MATRIX_VERSION: &str = "${{ matrix.java-version }}";

const INSTALL_SCRIPT: &str = "echo \"Installing Maven-built Java application to local Maven repository\"
mvn jar:jar install:install help:evaluate -Dexpression=project.name";

const PROJECT_INFO_SCRIPT: &str = "echo \"Extracting project name and version\"
NAME=$(mvn -q -DforceStdout help:evaluate -Dexpression=project.name)
VERSION=$(mvn -q -DforceStdout help:evaluate -Dexpression=project.version)
echo \"PROJECT_NAME=$NAME\" >> $GITHUB_OUTPUT
echo \"PROJECT_VERSION=$VERSION\" >> $GITHUB_OUTPUT
echo \"Project: $NAME\"
echo \"Version: $VERSION\"";

const RUN_APPLICATION_SCRIPT: &str = "echo \"Running the Java application\"
java -jar target/${{ steps.project-info.outputs.PROJECT_NAME }}-${{ steps.project-info.outputs.PROJECT_VERSION }}.jar";

/// Where Maven commands run, relative to the repository root.
struct ProjectLocation {
    working_directory: Option<String>,
}

impl ProjectLocation {
    fn from_model(model: &PipelineModel) -> Self {
        let working_directory = model
            .working_directory
            .as_deref()
            .filter(|dir| !dir.is_empty() && *dir != ".")
            .map(|dir| format!("./{dir}"));
        Self { working_directory }
    }

    fn dir(&self) -> Option<&str> {
        self.working_directory.as_deref()
    }

    /// `path` below the project directory.
    fn path(&self, path: &str) -> String {
        match &self.working_directory {
            Some(dir) => format!("{dir}/{path}"),
            None => path.to_string(),
        }
    }
}

pub(super) fn jobs(model: &PipelineModel, config: &WorkflowConfig) -> Document {
    let location = ProjectLocation::from_model(model);
    let mut jobs = Mapping::new();

    jobs.insert(BUILD_JOB.to_string(), build_job(config, &location));
    if model.has_stage_of_type(StageType::Deliver) {
        jobs.insert(DELIVER_JOB.to_string(), deliver_job(config, &location));
    }
    jobs.insert(SECURITY_JOB.to_string(), security_job(config, &location));

    Document::Mapping(jobs)
}

fn setup_java_step(name: String, java_version: &str) -> Document {
    mapping! {
        "name" => name,
        "uses" => "actions/setup-java@v4",
        "with" => mapping! {
            "java-version" => java_version,
            "distribution" => "temurin",
            "cache" => "maven",
        },
    }
}

fn run_step(name: &str, run: &str) -> Document {
    mapping! { "name" => name, "run" => run }
}

fn build_job(config: &WorkflowConfig, location: &ProjectLocation) -> Document {
    let mut steps = vec![
        checkout_step(),
        setup_java_step(format!("Set up JDK {MATRIX_VERSION}"), MATRIX_VERSION),
        mapping! {
            "name" => "Cache Maven dependencies",
            "uses" => "actions/cache@v4",
            "with" => mapping! {
                "path" => "~/.m2",
                "key" => "${{ runner.os }}-m2-${{ hashFiles('**/pom.xml') }}",
                "restore-keys" => "${{ runner.os }}-m2",
            },
        },
    ];

    let mut maven_steps = vec![
        run_step("Validate Maven project", "mvn validate"),
        run_step("Compile project", "mvn compile"),
        run_step("Run tests", "mvn test"),
        mapping! {
            "name" => "Generate test report",
            "uses" => "dorny/test-reporter@v1",
            "if" => "success() || failure()",
            "with" => mapping! {
                "name" => format!("Maven Tests (JDK {MATRIX_VERSION})"),
                "path" => location.path("target/surefire-reports/*.xml"),
                "reporter" => "java-junit",
                "fail-on-error" => true,
            },
        },
        run_step("Build package", "mvn -B -DskipTests clean package"),
        mapping! {
            "name" => "Upload build artifacts",
            "uses" => "actions/upload-artifact@v4",
            "if" => format!("matrix.java-version == '{}'", config.latest_runtime()),
            "with" => mapping! {
                "name" => JAR_ARTIFACT,
                "path" => location.path("target/*.jar"),
                "retention-days" => 30,
            },
        },
    ];
    apply_working_directory(&mut maven_steps, location.dir(), |run| run.starts_with("mvn"));
    steps.extend(maven_steps);

    mapping! {
        "runs-on" => config.runner(),
        "strategy" => mapping! {
            "matrix" => mapping! {
                "java-version" => config.runtime_versions().to_vec(),
            },
        },
        "steps" => steps,
    }
}

fn deliver_job(config: &WorkflowConfig, location: &ProjectLocation) -> Document {
    let latest = config.latest_runtime();

    let mut steps = vec![
        checkout_step(),
        setup_java_step(format!("Set up JDK {latest}"), latest),
        mapping! {
            "name" => "Download build artifacts",
            "uses" => "actions/download-artifact@v4",
            "with" => mapping! {
                "name" => JAR_ARTIFACT,
                "path" => location.path("target/"),
            },
        },
        run_step("Install to local repository", INSTALL_SCRIPT),
        mapping! {
            "name" => "Extract project information",
            "id" => "project-info",
            "run" => PROJECT_INFO_SCRIPT,
        },
        run_step("Run application", RUN_APPLICATION_SCRIPT),
    ];
    apply_working_directory(&mut steps, location.dir(), |run| {
        run.contains("mvn") || run.contains("java -jar")
    });

    mapping! {
        "needs" => BUILD_JOB,
        "runs-on" => config.runner(),
        "if" => "github.ref == 'refs/heads/main'",
        "steps" => steps,
    }
}

fn security_job(config: &WorkflowConfig, location: &ProjectLocation) -> Document {
    let latest = config.latest_runtime();

    let mut steps = vec![
        checkout_step(),
        setup_java_step(format!("Set up JDK {latest}"), latest),
        mapping! {
            "name" => "Run OWASP Dependency Check",
            "run" => "mvn org.owasp:dependency-check-maven:check",
            "continue-on-error" => true,
        },
        mapping! {
            "name" => "Upload OWASP Dependency Check results",
            "uses" => "actions/upload-artifact@v4",
            "if" => "always()",
            "with" => mapping! {
                "name" => "owasp-dependency-check-report",
                "path" => location.path("target/dependency-check-report.html"),
                "retention-days" => 30,
            },
        },
    ];
    apply_working_directory(&mut steps, location.dir(), |run| run.contains("mvn"));

    mapping! {
        "runs-on" => config.runner(),
        "needs" => BUILD_JOB,
        "steps" => steps,
    }
}
