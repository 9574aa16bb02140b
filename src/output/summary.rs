use std::fmt::Write;

use comfy_table::{Cell, Color as TableColor};

use crate::model::ProjectType;
use crate::report::ConversionReport;

use super::styling::{bright, bright_green, bright_red, bright_yellow, cyan, dim};
use super::tables::{attention_cell, count_cell, create_table, cyan_header, project_type_cell};

/// Prints a human-readable summary of a conversion run to stdout.
///
/// Shows an overview (paths, counts, copied files), a table of the generated
/// workflows with their project type, stages and jobs, and any Jenkinsfiles
/// that failed to convert.
pub fn print_summary(report: &ConversionReport, workflows_dir: &str) {
    println!("{}", render_summary(report, workflows_dir));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", bright(emoji), bright(title).underlined());
}

fn render_summary(report: &ConversionReport, workflows_dir: &str) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "📊", "Overview");

    let converted = if report.failures.is_empty() {
        bright_green(report.workflows.len())
    } else {
        bright_yellow(report.workflows.len())
    };

    let _ = writeln!(
        output,
        "  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n",
        dim("Input:"),
        cyan(&report.input),
        dim("Output:"),
        cyan(&report.output),
        dim("Jenkinsfiles found:"),
        bright_yellow(report.total_pipelines()),
        dim("Workflows generated:"),
        converted,
        dim("Files copied:"),
        bright_yellow(format!(
            "{} ({} already present)",
            report.migration.files_copied, report.migration.files_skipped
        )),
    );

    if report.workflows.is_empty() && report.failures.is_empty() {
        let _ = writeln!(
            output,
            "{}",
            bright_yellow("No Jenkinsfiles found; only project files were copied.")
        );
        return output;
    }

    if !report.workflows.is_empty() {
        add_section_header(&mut output, "🔄", "Generated Workflows");

        let mut table = create_table();
        table.set_header(cyan_header(&["Jenkinsfile", "Workflow", "Type", "Stages", "Jobs"]));

        for workflow in &report.workflows {
            let stages = if workflow.stages.is_empty() {
                "None".to_string()
            } else {
                workflow
                    .stages
                    .iter()
                    .map(|stage| format!("{} ({})", stage.name, stage.stage_type))
                    .collect::<Vec<_>>()
                    .join("\n")
            };

            table.add_row(vec![
                Cell::new(&workflow.source),
                Cell::new(&workflow.workflow),
                project_type_cell(workflow.project_type),
                Cell::new(stages),
                Cell::new(workflow.jobs.join("\n")),
            ]);
        }

        let _ = writeln!(output, "{table}\n");
    }

    if !report.failures.is_empty() {
        add_section_header(&mut output, "❌", "Failed Conversions");

        let mut table = create_table();
        table.set_header(cyan_header(&["#", "Jenkinsfile", "Error"]));
        for (idx, failure) in report.failures.iter().enumerate() {
            table.add_row(vec![
                Cell::new(idx + 1),
                Cell::new(&failure.source),
                Cell::new(&failure.error).fg(TableColor::Red),
            ]);
        }
        let _ = writeln!(output, "{table}\n");
    }

    add_section_header(&mut output, "💡", "Next Steps");
    let generic_fallbacks = report
        .workflows
        .iter()
        .filter(|workflow| matches!(workflow.project_type, ProjectType::Gradle | ProjectType::Node))
        .count();

    let mut steps_table = create_table();
    steps_table.set_header(cyan_header(&["Check", "Count"]));
    steps_table.add_row(vec![
        Cell::new("Workflows to review before pushing"),
        count_cell(report.workflows.len()),
    ]);
    steps_table.add_row(vec![
        Cell::new("Gradle/Node pipelines using the generic job"),
        attention_cell(generic_fallbacks),
    ]);
    steps_table.add_row(vec![
        Cell::new("Jenkinsfiles to convert by hand"),
        attention_cell(report.failures.len()),
    ]);
    let _ = writeln!(output, "{steps_table}");
    let _ = writeln!(
        output,
        "  {} {}",
        dim("Workflows written to:"),
        cyan(workflows_dir)
    );
    if !report.failures.is_empty() {
        let _ = writeln!(
            output,
            "  {}",
            bright_red("Some Jenkinsfiles could not be converted; rerun with --verbose for details.")
        );
    }

    output
}
