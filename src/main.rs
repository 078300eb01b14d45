use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use np::cli::{
    run_config_list, run_config_set, run_publish_workflow, Collaborators, ConfigSetArgs,
    ConfigSetOutcome, PublishWorkflowArgs,
};
use np::collaborators::{CommandBuild, GitCli, NpmClient};
use np::config::{ConfigStore, Credentials};
use np::domain::{PreReleaseTag, VersionRequest};
use np::git_ops::GitRepo;
use np::manifest::{PackageManifest, MANIFEST_FILE_NAME};
use np::process::ProcessRunner;
use np::{observability, settings, ui};

const CONFIG_SET_USAGE: &str =
    "Usage: np config set [--name|-n NAME] [--pwd|-p PASSWORD] [--registry|-r URL]";

#[derive(clap::Parser)]
#[command(
    name = "np",
    version,
    about = "Bump the version, build, commit, push and publish an npm package"
)]
struct Args {
    #[arg(long, global = true, help = "Credentials file path [default: ~/.npconfig]")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Project settings file (np.toml)")]
    settings: Option<String>,

    #[arg(short, long, global = true, help = "Only log errors")]
    quiet: bool,

    #[arg(long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage stored registry credentials
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Publish the package in the current directory to the registry
    Publish(PublishCli),
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Store account name, password or registry URL
    Set(ConfigSetCli),
    /// Show stored settings
    List,
}

#[derive(clap::Args)]
struct ConfigSetCli {
    #[arg(short = 'n', long, help = "Registry account name")]
    name: Option<String>,

    #[arg(short = 'p', long, help = "Registry account password")]
    pwd: Option<String>,

    #[arg(short = 'r', long, help = "Registry URL")]
    registry: Option<String>,
}

#[derive(clap::Args)]
struct PublishCli {
    #[arg(short, long, help = "Pre-release tag to publish under (alpha, beta, rc)")]
    tag: Option<String>,

    #[arg(
        short = 'v',
        long = "version",
        help = "Publish exactly this version; --tag is ignored"
    )]
    explicit_version: Option<String>,

    #[arg(
        short = 'p',
        long = "preReleaseNumber",
        alias = "pre-release-number",
        help = "Pre-release number, required with --tag"
    )]
    pre_release_number: Option<u64>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Path to package.json")]
    manifest: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = observability::init_logging(args.quiet, args.verbose) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let store = match &args.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default_location()?,
    };

    match args.command {
        Commands::Config { action } => match action {
            ConfigAction::Set(cli) => config_set(&store, cli),
            ConfigAction::List => {
                let entries = run_config_list(&store)?;
                ui::display_config_entries(&entries);
                Ok(())
            }
        },
        Commands::Publish(cli) => publish(&store, args.settings.as_deref(), cli),
    }
}

fn config_set(store: &ConfigStore, cli: ConfigSetCli) -> Result<()> {
    let args = ConfigSetArgs {
        username: cli.name,
        password: cli.pwd,
        registry: cli.registry,
    };

    match run_config_set(store, &args)? {
        ConfigSetOutcome::NothingToSet => println!("{}", CONFIG_SET_USAGE),
        ConfigSetOutcome::Updated(keys) => {
            let names: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
            ui::display_success(&format!(
                "Saved {} to {}",
                names.join(", "),
                store.path().display()
            ));
        }
    }
    Ok(())
}

fn publish(store: &ConfigStore, settings_path: Option<&str>, cli: PublishCli) -> Result<()> {
    let settings = settings::load_settings(settings_path)?;
    let credentials = Credentials::from_config(&store.load()?)?;

    // --version makes --tag irrelevant, including an unknown one
    let tag = match &cli.explicit_version {
        Some(_) => None,
        None => cli
            .tag
            .as_deref()
            .map(str::parse::<PreReleaseTag>)
            .transpose()?,
    };

    let manifest_path = cli
        .manifest
        .unwrap_or_else(|| PathBuf::from(MANIFEST_FILE_NAME));
    let mut manifest = PackageManifest::open(&manifest_path)
        .with_context(|| format!("cannot load {}", manifest_path.display()))?;
    let project_dir = project_dir(&manifest_path);

    let git_repo = GitRepo::discover(&project_dir)?;
    if let Some(branch) = git_repo.current_branch() {
        info!(%branch, "publishing from branch");
    }
    for warning in git_repo.preflight_warnings()? {
        ui::display_warning(&warning);
    }

    if let Some(name) = manifest.name() {
        ui::display_status(&format!("Publishing {}", name));
    }

    let runner = ProcessRunner::new(&project_dir);
    let build = CommandBuild::new(runner.clone(), settings.build.command.clone());
    let vcs = GitCli::new(runner.clone());
    let registry = NpmClient::new(runner, settings.registry.client.clone());

    let workflow_args = PublishWorkflowArgs {
        request: VersionRequest {
            explicit: cli.explicit_version,
            tag,
            pre_release_number: cli.pre_release_number,
        },
        dry_run: cli.dry_run,
    };

    let result = run_publish_workflow(
        &workflow_args,
        &settings,
        &credentials,
        Collaborators {
            manifest: &mut manifest,
            build: &build,
            vcs: &vcs,
            registry: &registry,
        },
        &mut |event| ui::display_event(&event),
    )?;

    if result.published {
        let channel = result.dist_tag.as_deref().unwrap_or("latest");
        ui::display_success(&format!(
            "Successfully published version {} ({})",
            result.version, channel
        ));
    } else {
        ui::display_status(&format!(
            "Dry run complete; version {} was not published",
            result.version
        ));
    }
    Ok(())
}

fn project_dir(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
