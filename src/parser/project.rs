use std::path::{Component, Path};

use log::debug;

use crate::model::ProjectType;

/// Marker files per project type, in detection priority.
const MARKERS: &[(ProjectType, &[&str])] = &[
    (ProjectType::Maven, &["pom.xml"]),
    (ProjectType::Gradle, &["build.gradle", "build.gradle.kts"]),
    (ProjectType::Node, &["package.json"]),
];

/// Detects the project type of `project_dir` from its marker files.
///
/// For anything but a generic project the directory's path relative to
/// `input_root` is returned as well (`.` for the root itself).
pub fn detect_project(project_dir: &Path, input_root: &Path) -> (ProjectType, Option<String>) {
    let detected = MARKERS
        .iter()
        .find(|(_, files)| files.iter().any(|file| project_dir.join(file).is_file()))
        .map(|(project_type, _)| *project_type);

    match detected {
        Some(project_type) => {
            let working_directory = relative_path(project_dir, input_root);
            debug!(
                "Detected {project_type} project in {} (working directory: {working_directory})",
                project_dir.display()
            );
            (project_type, Some(working_directory))
        }
        None => (ProjectType::Generic, None),
    }
}

/// `/`-separated path of `path` below `root`, `.` when they are the same.
pub fn relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    mod detect_project {
        use super::*;

        #[test]
        fn maven_wins_over_gradle_and_node() {
            let root = tempfile::tempdir().unwrap();
            let dir = root.path().join("service");
            fs::create_dir(&dir).unwrap();
            for marker in ["pom.xml", "build.gradle", "package.json"] {
                fs::write(dir.join(marker), "").unwrap();
            }

            assert_eq!(
                detect_project(&dir, root.path()),
                (ProjectType::Maven, Some("service".to_string()))
            );
        }

        #[test]
        fn gradle_kotlin_script_detected() {
            let root = tempfile::tempdir().unwrap();
            fs::write(root.path().join("build.gradle.kts"), "").unwrap();
            fs::write(root.path().join("package.json"), "{}").unwrap();

            assert_eq!(
                detect_project(root.path(), root.path()),
                (ProjectType::Gradle, Some(".".to_string()))
            );
        }

        #[test]
        fn node_detected_from_package_json() {
            let root = tempfile::tempdir().unwrap();
            fs::write(root.path().join("package.json"), "{}").unwrap();

            assert_eq!(detect_project(root.path(), root.path()).0, ProjectType::Node);
        }

        #[test]
        fn generic_without_markers() {
            let root = tempfile::tempdir().unwrap();
            assert_eq!(
                detect_project(root.path(), root.path()),
                (ProjectType::Generic, None)
            );
        }

        #[test]
        fn marker_directory_does_not_count() {
            let root = tempfile::tempdir().unwrap();
            fs::create_dir(root.path().join("pom.xml")).unwrap();
            assert_eq!(detect_project(root.path(), root.path()).0, ProjectType::Generic);
        }
    }

    mod relative_path {
        use super::*;

        #[test]
        fn joins_nested_components_with_slash() {
            let root = Path::new("/repo");
            assert_eq!(relative_path(&root.join("apps").join("web"), root), "apps/web");
        }

        #[test]
        fn root_is_dot() {
            assert_eq!(relative_path(Path::new("/repo"), Path::new("/repo")), ".");
        }
    }
}
