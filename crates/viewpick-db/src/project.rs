//! dbt project directory checks.
//!
//! The tool must be invoked from (or pointed at) the root of a dbt project;
//! both the project file and `profiles.yml` have to be present before any
//! database work starts, so misconfiguration fails fast with a message that
//! says what to fix.

use std::path::{Path, PathBuf};

use crate::error::{DbError, Result};

const PROJECT_FILES: [&str; 2] = ["dbt_project.yml", "dbt_project.yaml"];
const PROFILES_FILES: [&str; 2] = ["profiles.yml", "profiles.yaml"];

/// A validated dbt project root.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    root: PathBuf,
    profiles_path: PathBuf,
}

impl ProjectDir {
    /// Validate `root` as a dbt project and locate its `profiles.yml`.
    pub fn locate(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        find_first(&root, &PROJECT_FILES).ok_or_else(|| {
            DbError::Environment(format!(
                "this command must be run from inside a dbt project, but no \
                 `dbt_project.yml` or `dbt_project.yaml` was found in {}",
                root.display()
            ))
        })?;

        let profiles_path = find_first(&root, &PROFILES_FILES).ok_or_else(|| {
            DbError::Environment(format!(
                "the project directory should contain a `profiles.yml` or \
                 `profiles.yaml`, but no such file was found in {}",
                root.display()
            ))
        })?;

        Ok(Self {
            root,
            profiles_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profiles_path(&self) -> &Path {
        &self.profiles_path
    }
}

fn find_first(root: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("viewpick-project-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_project_file_is_an_environment_error() {
        let dir = temp_dir("empty");
        let err = ProjectDir::locate(&dir).unwrap_err();
        assert!(matches!(err, DbError::Environment(_)));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_profiles_is_an_environment_error() {
        let dir = temp_dir("no-profiles");
        fs::write(dir.join("dbt_project.yml"), "name: demo\n").unwrap();
        let err = ProjectDir::locate(&dir).unwrap_err();
        assert!(matches!(err, DbError::Environment(_)));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn yaml_extension_variants_are_accepted() {
        let dir = temp_dir("variants");
        fs::write(dir.join("dbt_project.yaml"), "name: demo\n").unwrap();
        fs::write(dir.join("profiles.yaml"), "{}\n").unwrap();
        let project = ProjectDir::locate(&dir).unwrap();
        assert!(project.profiles_path().ends_with("profiles.yaml"));
        let _ = fs::remove_dir_all(&dir);
    }
}
