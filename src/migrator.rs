use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

/// File names that are never copied into the output tree.
const EXCLUDED_FILES: &[&str] = &["Jenkinsfile*", "jenkinsfile", "*.pyc", ".DS_Store", "Thumbs.db"];

/// Directory names whose whole subtree is skipped.
const EXCLUDED_DIRS: &[&str] = &["jenkins", ".git", "__pycache__"];

static FILE_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| compile(EXCLUDED_FILES));
static DIR_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| compile(EXCLUDED_DIRS));

fn compile(patterns: &[&str]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| Pattern::new(pattern).ok())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStats {
    pub files_copied: usize,
    /// Files left alone because the destination already existed.
    pub files_skipped: usize,
    pub entries_excluded: usize,
}

/// Copies a Jenkins project tree into the output tree, minus Jenkins-specific files.
pub struct TreeMigrator {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl TreeMigrator {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Copies every non-excluded file, never overwriting an existing destination file.
    ///
    /// # Errors
    ///
    /// Returns an error if the input tree cannot be walked or a file cannot be copied.
    pub fn migrate(&self) -> Result<MigrationStats> {
        info!("Copying source code to {}", self.output_root.display());

        let mut stats = MigrationStats::default();
        let excluded_count = Cell::new(0usize);
        let output_inside_input =
            self.output_root != self.input_root && self.output_root.starts_with(&self.input_root);

        let mut walker = WalkDir::new(&self.input_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let excluded = is_excluded(entry)
                    || (output_inside_input && entry.path().starts_with(&self.output_root));
                if excluded {
                    debug!("Excluded: {}", entry.path().display());
                    excluded_count.set(excluded_count.get() + 1);
                }
                !excluded
            });

        while let Some(entry) = walker.next() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(&self.input_root)
                .unwrap_or_else(|_| entry.path());
            let destination = self.output_root.join(relative);

            if entry.file_type().is_dir() {
                if destination.exists() && !destination.is_dir() {
                    warn!(
                        "Keeping existing file in place of directory: {}",
                        destination.display()
                    );
                    stats.files_skipped += 1;
                    walker.skip_current_dir();
                    continue;
                }
                fs::create_dir_all(&destination)?;
            } else if entry.path().is_dir() {
                warn!("Not following directory symlink: {}", entry.path().display());
            } else if destination.exists() {
                debug!("Keeping existing file: {}", destination.display());
                stats.files_skipped += 1;
            } else {
                copy_file(entry.path(), &destination)?;
                stats.files_copied += 1;
            }
        }

        stats.entries_excluded = excluded_count.get();
        info!(
            "Copied {} files ({} already present, {} entries excluded)",
            stats.files_copied, stats.files_skipped, stats.entries_excluded
        );
        Ok(stats)
    }
}

fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, destination)?;
    debug!("Copied file: {} -> {}", source.display(), destination.display());
    Ok(())
}

fn is_excluded(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    let patterns = if entry.file_type().is_dir() {
        DIR_PATTERNS.as_slice()
    } else {
        FILE_PATTERNS.as_slice()
    };
    patterns.iter().any(|pattern| pattern.matches(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn fixture() -> TempDir {
        let input = tempfile::tempdir().unwrap();
        let root = input.path();
        write(root, "pom.xml", "<project/>");
        write(root, "Jenkinsfile", "pipeline {}");
        write(root, "src/main/java/App.java", "class App {}");
        write(root, "src/main/java/App.pyc", "bytecode");
        write(root, "jenkins/scripts/deliver.sh", "#!/bin/sh");
        write(root, ".git/HEAD", "ref: refs/heads/main");
        write(root, "tools/__pycache__/x.pyc", "");
        write(root, "module/Jenkinsfile.groovy", "");
        write(root, "module/jenkinsfile", "");
        write(root, "module/README.md", "docs");
        write(root, ".DS_Store", "");
        input
    }

    #[test]
    fn copies_everything_except_jenkins_artifacts() {
        let input = fixture();
        let output = tempfile::tempdir().unwrap();

        let stats = TreeMigrator::new(input.path(), output.path()).migrate().unwrap();

        let out = output.path();
        assert!(out.join("pom.xml").is_file());
        assert!(out.join("src/main/java/App.java").is_file());
        assert!(out.join("module/README.md").is_file());
        assert!(!out.join("Jenkinsfile").exists());
        assert!(!out.join("module/Jenkinsfile.groovy").exists());
        assert!(!out.join("module/jenkinsfile").exists());
        assert!(!out.join("src/main/java/App.pyc").exists());
        assert!(!out.join("jenkins").exists());
        assert!(!out.join(".git").exists());
        assert!(!out.join("tools/__pycache__").exists());
        assert!(!out.join(".DS_Store").exists());

        assert_eq!(stats.files_copied, 3);
        assert_eq!(stats.files_skipped, 0);
    }

    #[test]
    fn never_overwrites_existing_files() {
        let input = fixture();
        let output = tempfile::tempdir().unwrap();
        write(output.path(), "pom.xml", "already here");

        let stats = TreeMigrator::new(input.path(), output.path()).migrate().unwrap();
        assert_eq!(fs::read_to_string(output.path().join("pom.xml")).unwrap(), "already here");
        assert_eq!(stats.files_skipped, 1);

        let rerun = TreeMigrator::new(input.path(), output.path()).migrate().unwrap();
        assert_eq!(rerun.files_copied, 0);
        assert_eq!(rerun.files_skipped, 3);
        assert_eq!(fs::read_to_string(output.path().join("pom.xml")).unwrap(), "already here");
    }

    #[test]
    fn keeps_existing_file_where_directory_would_go() {
        let input = tempfile::tempdir().unwrap();
        write(input.path(), "docs/a.md", "guide");
        write(input.path(), "README.md", "readme");
        let output = tempfile::tempdir().unwrap();
        write(output.path(), "docs", "not a directory");

        let stats = TreeMigrator::new(input.path(), output.path()).migrate().unwrap();

        assert_eq!(fs::read_to_string(output.path().join("docs")).unwrap(), "not a directory");
        assert!(output.path().join("README.md").is_file());
        assert_eq!(stats.files_copied, 1);
        assert_eq!(stats.files_skipped, 1);
    }

    #[cfg(unix)]
    #[test]
    fn copies_file_symlinks_and_skips_directory_symlinks() {
        use std::os::unix::fs::symlink;

        let input = tempfile::tempdir().unwrap();
        write(input.path(), "real.txt", "content");
        write(input.path(), "data/x.txt", "x");
        symlink(input.path().join("real.txt"), input.path().join("link.txt")).unwrap();
        symlink(input.path().join("data"), input.path().join("linked-data")).unwrap();
        let output = tempfile::tempdir().unwrap();

        let stats = TreeMigrator::new(input.path(), output.path()).migrate().unwrap();

        let copied = output.path().join("link.txt");
        assert!(!fs::symlink_metadata(&copied).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(copied).unwrap(), "content");
        assert!(output.path().join("data/x.txt").is_file());
        assert!(!output.path().join("linked-data").exists());
        assert_eq!(stats.files_copied, 3);
    }

    #[test]
    fn merges_into_existing_directories() {
        let input = fixture();
        let output = tempfile::tempdir().unwrap();
        write(output.path(), "src/main/java/Existing.java", "keep");

        TreeMigrator::new(input.path(), output.path()).migrate().unwrap();

        assert!(output.path().join("src/main/java/Existing.java").is_file());
        assert!(output.path().join("src/main/java/App.java").is_file());
    }

    #[test]
    fn skips_output_nested_inside_input() {
        let input = fixture();
        let output = input.path().join("converted");
        fs::create_dir(&output).unwrap();

        let stats = TreeMigrator::new(input.path(), &output).migrate().unwrap();

        assert_eq!(stats.files_copied, 3);
        assert!(!output.join("converted").exists());
    }
}
