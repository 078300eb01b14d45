//! Main publish workflow
//!
//! The workflow is a straight sequence over the collaborator traits. Each step
//! aborts the run on failure and nothing already done is rolled back: a pushed
//! commit stays pushed when the publish afterwards fails.

use std::fmt;

use tracing::{info, instrument};

use crate::collaborators::{BuildRunner, ManifestStore, RegistryClient, VcsClient};
use crate::config::Credentials;
use crate::domain::{is_upgrade, next_version, Version, VersionChange, VersionRequest};
use crate::error::Result;
use crate::settings::ProjectSettings;
use crate::warnings::PublishWarning;

/// Arguments for the publish workflow
///
/// Mirrors the `publish` command line without depending on clap, so the
/// workflow can be driven programmatically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishWorkflowArgs {
    /// How the next version is chosen
    pub request: VersionRequest,

    /// Preview mode - compute the version, touch nothing
    pub dry_run: bool,
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version found in the manifest
    pub previous_version: Version,

    /// Version that was (or in a dry run, would be) published
    pub version: Version,

    /// Update rule that produced `version`
    pub change: VersionChange,

    /// npm dist-tag used for the publish, `None` for the default tag
    pub dist_tag: Option<String>,

    /// Whether the registry publish actually ran
    pub published: bool,

    /// Non-fatal issues noticed along the way
    pub warnings: Vec<PublishWarning>,
}

/// Side-effecting steps of a publish, in execution order
#[derive(Debug, Clone, PartialEq)]
pub enum PublishStep {
    WriteManifest { version: String },
    Build { command: String },
    Stage,
    Commit { message: String },
    Push { remote: String, refspec: String },
    SetRegistry { url: String },
    Login { username: String },
    Publish { dist_tag: Option<String> },
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishStep::WriteManifest { version } => {
                write!(f, "Write version {} to manifest", version)
            }
            PublishStep::Build { command } => write!(f, "Build: {}", command),
            PublishStep::Stage => write!(f, "Stage changes: git add ."),
            PublishStep::Commit { message } => write!(f, "Commit: \"{}\"", message),
            PublishStep::Push { remote, refspec } => {
                write!(f, "Push: git push {} {}", remote, refspec)
            }
            PublishStep::SetRegistry { url } => write!(f, "Use registry {}", url),
            PublishStep::Login { username } => write!(f, "Log in as {}", username),
            PublishStep::Publish { dist_tag: Some(tag) } => {
                write!(f, "Publish with dist-tag '{}'", tag)
            }
            PublishStep::Publish { dist_tag: None } => write!(f, "Publish with default dist-tag"),
        }
    }
}

/// Progress notifications emitted while the workflow runs
#[derive(Debug, Clone, PartialEq)]
pub enum PublishEvent {
    VersionSelected {
        previous: Version,
        next: Version,
        change: VersionChange,
    },
    Warning(PublishWarning),
    StepStarted(PublishStep),
    /// A step finished; `output` is the client's console output worth showing
    StepCompleted {
        step: PublishStep,
        output: Option<String>,
    },
    /// Dry run: the steps that would have run
    Planned(Vec<PublishStep>),
}

/// The external parties the workflow talks to
pub struct Collaborators<'a> {
    pub manifest: &'a mut dyn ManifestStore,
    pub build: &'a dyn BuildRunner,
    pub vcs: &'a dyn VcsClient,
    pub registry: &'a dyn RegistryClient,
}

/// Steps a publish of `version` performs, in order.
pub fn plan_steps(
    version: &Version,
    settings: &ProjectSettings,
    credentials: &Credentials,
) -> Vec<PublishStep> {
    let rendered = version.to_string();
    let mut steps = vec![
        PublishStep::WriteManifest {
            version: rendered.clone(),
        },
        PublishStep::Build {
            command: settings.build.command.join(" "),
        },
        PublishStep::Stage,
        PublishStep::Commit {
            message: settings.git.commit_message_for(&rendered),
        },
        PublishStep::Push {
            remote: settings.git.remote.clone(),
            refspec: settings.git.push_ref.clone(),
        },
    ];

    if let Some(url) = &credentials.registry {
        steps.push(PublishStep::SetRegistry { url: url.clone() });
    }

    steps.push(PublishStep::Login {
        username: credentials.username.clone(),
    });
    steps.push(PublishStep::Publish {
        dist_tag: version.pre_release_tag().map(|tag| tag.to_string()),
    });
    steps
}

/// Main publish workflow
///
/// 1. Read the current version from the manifest
/// 2. Select the next version
/// 3. Write it back, build, commit and push
/// 4. Point the client at the configured registry, log in and publish
///
/// # Arguments
///
/// * `args` - Version request and dry-run flag
/// * `settings` - Project settings (build command, git remote, client)
/// * `credentials` - Registry credentials from the config store
/// * `collaborators` - Implementations of every side effect
/// * `on_event` - Progress callback
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn run_publish_workflow(
    args: &PublishWorkflowArgs,
    settings: &ProjectSettings,
    credentials: &Credentials,
    collaborators: Collaborators<'_>,
    on_event: &mut dyn FnMut(PublishEvent),
) -> Result<WorkflowResult> {
    let Collaborators {
        manifest,
        build,
        vcs,
        registry,
    } = collaborators;

    let previous = manifest.current_version()?;
    let (version, change) = next_version(&previous, &args.request)?;
    info!(%previous, %version, ?change, "selected version");
    on_event(PublishEvent::VersionSelected {
        previous,
        next: version,
        change,
    });

    let mut warnings = Vec::new();
    if !is_upgrade(&previous, &version) {
        let warning = PublishWarning::VersionNotIncreasing {
            current: previous.to_string(),
            next: version.to_string(),
        };
        on_event(PublishEvent::Warning(warning.clone()));
        warnings.push(warning);
    }

    let dist_tag = version.pre_release_tag().map(|tag| tag.to_string());
    let steps = plan_steps(&version, settings, credentials);

    if args.dry_run {
        info!("dry run, no changes made");
        on_event(PublishEvent::Planned(steps));
        return Ok(WorkflowResult {
            previous_version: previous,
            version,
            change,
            dist_tag,
            published: false,
            warnings,
        });
    }

    for step in steps {
        info!(step = %step, "running step");
        on_event(PublishEvent::StepStarted(step.clone()));

        let output = match &step {
            PublishStep::WriteManifest { .. } => {
                manifest.write_version(&version)?;
                None
            }
            PublishStep::Build { .. } => {
                build.build()?;
                None
            }
            PublishStep::Stage => {
                vcs.stage_all()?;
                None
            }
            PublishStep::Commit { message } => {
                vcs.commit(message)?;
                None
            }
            PublishStep::Push { remote, refspec } => {
                vcs.push(remote, refspec)?;
                None
            }
            PublishStep::SetRegistry { url } => {
                registry.set_registry(url)?;
                None
            }
            PublishStep::Login { .. } => Some(registry.login(credentials)?),
            PublishStep::Publish { dist_tag } => Some(registry.publish(dist_tag.as_deref())?),
        };

        on_event(PublishEvent::StepCompleted { step, output });
    }

    Ok(WorkflowResult {
        previous_version: previous,
        version,
        change,
        dist_tag,
        published: true,
        warnings,
    })
}
