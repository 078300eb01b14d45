use git2::{Repository, StatusOptions};
use std::path::Path;
use tracing::debug;

use crate::error::{NpError, Result};
use crate::warnings::PublishWarning;

/// Read-only view of the git repository a package lives in.
///
/// Used before publishing to make sure the release commit has somewhere to go.
/// The commit and push themselves are done by the `git` executable.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Discovers the git repository containing `path`.
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - Repository found in `path` or one of its parents
    /// * `Err` - If `path` is not inside a git repository
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|e| {
            NpError::preflight(format!(
                "{} is not inside a git repository: {}",
                path.display(),
                e.message()
            ))
        })?;
        debug!(git_dir = %repo.path().display(), "discovered git repository");
        Ok(GitRepo { repo })
    }

    /// Name of the checked-out branch, or `None` when HEAD is detached or unborn.
    pub fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        }
    }

    /// Number of modified, staged or untracked paths.
    pub fn uncommitted_changes(&self) -> Result<usize> {
        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.len())
    }

    /// Conditions worth reporting before a release commit is made.
    pub fn preflight_warnings(&self) -> Result<Vec<PublishWarning>> {
        let mut warnings = Vec::new();

        if self.repo.head_detached()? {
            warnings.push(PublishWarning::DetachedHead);
        }

        let changed_files = self.uncommitted_changes()?;
        if changed_files > 0 {
            warnings.push(PublishWarning::DirtyWorkingTree { changed_files });
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo_with_commit(dir: &Path) -> Repository {
        let repo = Repository::init(dir).unwrap();
        fs::write(dir.join("package.json"), "{}\n").unwrap();
        {
            let mut index = repo.index().unwrap();
            index.add_path(Path::new("package.json")).unwrap();
            index.write().unwrap();
            let tree_id = index.write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            let sig = Signature::now("Test", "test@example.com").unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap();
        }
        repo
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        init_repo_with_commit(dir.path());
        let nested = dir.path().join("packages").join("core");
        fs::create_dir_all(&nested).unwrap();

        assert!(GitRepo::discover(&nested).is_ok());
    }

    #[test]
    fn test_clean_repository_has_no_warnings() {
        let dir = TempDir::new().unwrap();
        init_repo_with_commit(dir.path());

        let repo = GitRepo::discover(dir.path()).unwrap();
        assert!(repo.current_branch().is_some());
        assert_eq!(repo.uncommitted_changes().unwrap(), 0);
        assert!(repo.preflight_warnings().unwrap().is_empty());
    }

    #[test]
    fn test_dirty_repository_is_reported() {
        let dir = TempDir::new().unwrap();
        init_repo_with_commit(dir.path());
        fs::write(dir.path().join("package.json"), "{\"version\": \"1.0.0\"}\n").unwrap();
        fs::write(dir.path().join("new.txt"), "x").unwrap();

        let repo = GitRepo::discover(dir.path()).unwrap();
        assert_eq!(
            repo.preflight_warnings().unwrap(),
            vec![PublishWarning::DirtyWorkingTree { changed_files: 2 }]
        );
    }

    #[test]
    fn test_detached_head_is_reported() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo_with_commit(dir.path());
        let head = raw.head().unwrap().target().unwrap();
        raw.set_head_detached(head).unwrap();

        let repo = GitRepo::discover(dir.path()).unwrap();
        assert_eq!(repo.current_branch(), None);
        assert!(repo
            .preflight_warnings()
            .unwrap()
            .contains(&PublishWarning::DetachedHead));
    }
}
