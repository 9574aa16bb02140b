use crate::document::Document;
use crate::mapping;
use crate::model::PipelineModel;

use super::{checkout_step, WorkflowConfig};

const BUILD_JOB: &str = "build-and-test";

/// One job that replays every extracted `sh` command, stage by stage.
pub(super) fn jobs(model: &PipelineModel, config: &WorkflowConfig) -> Document {
    let command_steps = model.stages.iter().flat_map(|stage| {
        stage.commands.iter().map(move |command| {
            mapping! {
                "name" => format!("Run {}", stage.name),
                "run" => command,
            }
        })
    });

    let steps: Vec<Document> = std::iter::once(checkout_step()).chain(command_steps).collect();

    mapping! {
        BUILD_JOB => mapping! {
            "runs-on" => config.runner(),
            "steps" => steps,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::to_yaml;
    use crate::generator::generate;
    use crate::generator::tests::stage;
    use crate::model::StageType;

    fn build_steps(workflow: &Document) -> &[Document] {
        workflow
            .get("jobs")
            .and_then(|jobs| jobs.get(BUILD_JOB))
            .and_then(|job| job.get("steps"))
            .and_then(Document::as_sequence)
            .unwrap()
    }

    #[test]
    fn no_stages_yields_only_checkout() {
        let workflow = generate(&PipelineModel::default(), &WorkflowConfig::default());
        let steps = build_steps(&workflow);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].get("uses").and_then(Document::as_str), Some("actions/checkout@v4"));
    }

    #[test]
    fn one_step_per_command_in_stage_order() {
        let model = PipelineModel {
            stages: vec![
                stage("Build", StageType::Build, &["make", "make docs"]),
                stage("Empty", StageType::Build, &[]),
                stage("Deploy", StageType::Deliver, &["./deploy.sh"]),
                stage("Build", StageType::Build, &["make"]),
            ],
            ..PipelineModel::default()
        };
        let workflow = generate(&model, &WorkflowConfig::default());

        let steps: Vec<(&str, &str)> = build_steps(&workflow)
            .iter()
            .skip(1)
            .map(|s| {
                (
                    s.get("name").and_then(Document::as_str).unwrap(),
                    s.get("run").and_then(Document::as_str).unwrap(),
                )
            })
            .collect();
        assert_eq!(
            steps,
            vec![
                ("Run Build", "make"),
                ("Run Build", "make docs"),
                ("Run Deploy", "./deploy.sh"),
                ("Run Build", "make"),
            ]
        );
    }

    #[test]
    fn renders_runner_and_steps() {
        let config = WorkflowConfig::new(vec!["17".into()], "self-hosted").unwrap();
        let model = PipelineModel {
            stages: vec![stage("Lint", StageType::Build, &["npm run lint"])],
            ..PipelineModel::default()
        };
        let text = to_yaml(&generate(&model, &config));

        assert!(text.ends_with(
            "jobs:
  build-and-test:
    runs-on: self-hosted
    steps:
      - name: Checkout code
        uses: actions/checkout@v4
      - name: Run Lint
        run: npm run lint
"
        ));
    }
}
