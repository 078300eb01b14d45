use std::fmt;

/// Non-fatal conditions noticed while preparing a publish.
/// These are reported to the user but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishWarning {
    /// The computed version does not sort above the manifest's version
    VersionNotIncreasing { current: String, next: String },
    /// Uncommitted changes that `git add .` will sweep into the release commit
    DirtyWorkingTree { changed_files: usize },
    /// HEAD is not on a branch, so pushing it will likely be rejected
    DetachedHead,
}

impl fmt::Display for PublishWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishWarning::VersionNotIncreasing { current, next } => {
                write!(
                    f,
                    "Version {} is not newer than the current version {}",
                    next, current
                )
            }
            PublishWarning::DirtyWorkingTree { changed_files } => {
                let noun = if *changed_files == 1 { "file" } else { "files" };
                write!(
                    f,
                    "{} uncommitted {} will be included in the release commit",
                    changed_files, noun
                )
            }
            PublishWarning::DetachedHead => {
                write!(f, "HEAD is detached; pushing may fail")
            }
        }
    }
}
