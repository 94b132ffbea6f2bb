//! Project and conversation file discovery under the Claude projects directory

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One project directory (`~/.claude/projects/<encoded-path>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir {
    /// Raw directory name, e.g. `-home-user-work-app`
    pub name: String,
    pub path: PathBuf,
}

impl ProjectDir {
    /// Decoded working directory path
    pub fn readable_name(&self) -> String {
        decode_project_name(&self.name)
    }

    /// Name of the output sub-directory for this project
    pub fn output_dir_name(&self) -> String {
        output_dir_name(&self.readable_name())
    }
}

/// Project directories directly under `root`, sorted by name.
/// Hidden directories and plain files are skipped.
pub fn find_projects(root: &Path) -> Vec<ProjectDir> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if name.starts_with('.') {
                return None;
            }
            Some(ProjectDir {
                name,
                path: entry.into_path(),
            })
        })
        .collect()
}

/// Conversation logs (`*.jsonl`) directly inside a project directory, sorted
pub fn find_conversation_files(project_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(project_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(".jsonl"))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// `-home-user-work` -> `home/user/work`
pub fn decode_project_name(encoded: &str) -> String {
    encoded.trim_start_matches('-').replace('-', "/")
}

/// Filesystem-safe directory name for a decoded project path
pub fn output_dir_name(readable: &str) -> String {
    readable.replace('/', "-").trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_decode_project_name() {
        assert_eq!(decode_project_name("-home-user-work-app"), "home/user/work/app");
        assert_eq!(decode_project_name("plain"), "plain");
        assert_eq!(decode_project_name("--x"), "x");
    }

    #[test]
    fn test_output_dir_name() {
        assert_eq!(output_dir_name("home/user/work/app"), "home-user-work-app");
        assert_eq!(output_dir_name("/tmp/"), "tmp");
    }

    #[test]
    fn test_find_projects_sorted_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("-home-b")).unwrap();
        fs::create_dir_all(tmp.path().join("-home-a")).unwrap();
        fs::create_dir_all(tmp.path().join(".hidden")).unwrap();
        fs::write(tmp.path().join("stray.jsonl"), "{}").unwrap();

        let projects = find_projects(tmp.path());
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["-home-a", "-home-b"]);
        assert_eq!(projects[0].readable_name(), "home/a");
        assert_eq!(projects[0].output_dir_name(), "home-a");
    }

    #[test]
    fn test_find_conversation_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.jsonl"), "{}").unwrap();
        fs::write(tmp.path().join("a.jsonl"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "hello").unwrap();
        fs::create_dir_all(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("c.jsonl"), "{}").unwrap();

        let files = find_conversation_files(tmp.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jsonl", "b.jsonl"]);
    }

    #[test]
    fn test_nonexistent_root() {
        assert!(find_projects(Path::new("/nonexistent/path")).is_empty());
    }
}
