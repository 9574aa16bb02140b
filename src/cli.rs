use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::Config;
use crate::converter::Converter;
use crate::output::{export_report, print_summary};

#[derive(Parser)]
#[command(name = "jenkins2gha")]
#[command(author, version, about = "Convert Jenkins pipelines into GitHub Actions workflows", long_about = None)]
pub struct Cli {
    /// Directory containing the Jenkins project
    #[arg(short, long)]
    input: PathBuf,

    /// Directory receiving the converted project
    #[arg(short, long)]
    output: PathBuf,

    /// Java versions for the build matrix (default: 17 21)
    #[arg(long, num_args = 1..)]
    java_versions: Option<Vec<String>>,

    /// GitHub Actions runner label (default: ubuntu-latest)
    #[arg(long)]
    runner: Option<String>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Configuration file (default: ./jenkins2gha.{toml,json,yaml,yml})
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the conversion report as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

impl Cli {
    pub fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let workflow_config =
            config.workflow_config(self.java_versions.clone(), self.runner.clone())?;

        info!(
            "Generating workflows for Java {} on {}",
            workflow_config.runtime_versions().join(", "),
            workflow_config.runner()
        );

        let converter = Converter::new(&self.input, &self.output, workflow_config);
        let report = converter
            .convert()
            .with_context(|| format!("Conversion of {} failed", self.input.display()))?;

        if let Some(report_path) = &self.report {
            let file = File::create(report_path).with_context(|| {
                format!("Failed to create report file: {}", report_path.display())
            })?;
            let mut writer = BufWriter::new(file);
            export_report(&report, self.pretty || config.output.pretty, &mut writer)?;
            info!("Report written to: {}", report_path.display());
        }

        print_summary(&report, &converter.workflows_dir().display().to_string());

        Ok(())
    }
}
