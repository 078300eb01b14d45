use np::cli::orchestration::{
    run_publish_workflow, Collaborators, PublishEvent, PublishWorkflowArgs, WorkflowResult,
};
use np::collaborators::mock::{CallLog, MockBuild, MockManifest, MockRegistry, MockVcs};
use np::config::Credentials;
use np::domain::{PreReleaseTag, Version, VersionChange, VersionRequest};
use np::settings::ProjectSettings;
use np::warnings::PublishWarning;
use np::{NpError, Result};

fn credentials(registry: Option<&str>) -> Credentials {
    Credentials {
        username: "alice".to_string(),
        password: "pw".to_string(),
        registry: registry.map(String::from),
    }
}

fn request(explicit: Option<&str>, tag: Option<PreReleaseTag>, n: Option<u64>) -> PublishWorkflowArgs {
    PublishWorkflowArgs {
        request: VersionRequest {
            explicit: explicit.map(String::from),
            tag,
            pre_release_number: n,
        },
        dry_run: false,
    }
}

struct Run {
    result: Result<WorkflowResult>,
    calls: Vec<String>,
    manifest_version: Version,
    events: Vec<PublishEvent>,
}

fn run_with(
    current: &str,
    args: PublishWorkflowArgs,
    creds: Credentials,
    build: impl FnOnce(CallLog) -> MockBuild,
    vcs: impl FnOnce(CallLog) -> MockVcs,
    registry: impl FnOnce(CallLog) -> MockRegistry,
) -> Run {
    let log = CallLog::new();
    let mut manifest = MockManifest::new(Version::parse(current).unwrap(), log.clone());
    let build = build(log.clone());
    let vcs = vcs(log.clone());
    let registry = registry(log.clone());
    let mut events = Vec::new();

    let result = run_publish_workflow(
        &args,
        &ProjectSettings::default(),
        &creds,
        Collaborators {
            manifest: &mut manifest,
            build: &build,
            vcs: &vcs,
            registry: &registry,
        },
        &mut |event| events.push(event),
    );

    Run {
        result,
        calls: log.calls(),
        manifest_version: manifest.version(),
        events,
    }
}

fn run_ok(current: &str, args: PublishWorkflowArgs, creds: Credentials) -> Run {
    run_with(current, args, creds, MockBuild::new, MockVcs::new, MockRegistry::new)
}

#[test]
fn test_release_runs_every_step_in_order() {
    let run = run_ok("1.2.3", request(None, None, None), credentials(None));
    let result = run.result.unwrap();

    assert_eq!(result.previous_version, Version::new(1, 2, 3));
    assert_eq!(result.version, Version::new(1, 2, 4));
    assert_eq!(result.change, VersionChange::Patch);
    assert_eq!(result.dist_tag, None);
    assert!(result.published);
    assert!(result.warnings.is_empty());
    assert_eq!(run.manifest_version, Version::new(1, 2, 4));
    assert_eq!(
        run.calls,
        vec![
            "manifest 1.2.4",
            "build",
            "git add",
            "git commit Added version 1.2.4",
            "git push origin HEAD",
            "login alice",
            "publish",
        ]
    );
}

#[test]
fn test_pre_release_publishes_under_its_tag() {
    let run = run_ok(
        "1.2.3-beta.1",
        request(None, Some(PreReleaseTag::Beta), Some(2)),
        credentials(None),
    );
    let result = run.result.unwrap();

    assert_eq!(result.version.to_string(), "1.2.3-beta.2");
    assert_eq!(result.dist_tag.as_deref(), Some("beta"));
    assert_eq!(run.calls.last().unwrap(), "publish --tag beta");
}

#[test]
fn test_configured_registry_is_set_before_login() {
    let run = run_ok(
        "0.1.0",
        request(None, None, None),
        credentials(Some("https://npm.example.com/")),
    );
    run.result.unwrap();

    let registry = run
        .calls
        .iter()
        .position(|c| c == "registry https://npm.example.com/")
        .expect("registry step missing");
    let push = run.calls.iter().position(|c| c.starts_with("git push")).unwrap();
    let login = run.calls.iter().position(|c| c == "login alice").unwrap();
    assert!(push < registry && registry < login);
}

#[test]
fn test_explicit_version_is_used_verbatim() {
    let run = run_ok(
        "1.2.3",
        request(Some("2.0.0-rc.1"), Some(PreReleaseTag::Alpha), None),
        credentials(None),
    );
    let result = run.result.unwrap();

    assert_eq!(result.change, VersionChange::Explicit);
    assert_eq!(result.version.to_string(), "2.0.0-rc.1");
    assert_eq!(result.dist_tag.as_deref(), Some("rc"));
}

#[test]
fn test_missing_pre_release_number_fails_before_side_effects() {
    let run = run_ok(
        "1.2.3",
        request(None, Some(PreReleaseTag::Alpha), None),
        credentials(None),
    );

    assert!(matches!(run.result, Err(NpError::MissingPreReleaseNumber(_))));
    assert!(run.calls.is_empty());
    assert_eq!(run.manifest_version, Version::new(1, 2, 3));
}

#[test]
fn test_build_failure_stops_before_git() {
    let run = run_with(
        "1.2.3",
        request(None, None, None),
        credentials(None),
        MockBuild::failing,
        MockVcs::new,
        MockRegistry::new,
    );

    assert!(run.result.is_err());
    assert_eq!(run.calls, vec!["manifest 1.2.4", "build"]);
}

#[test]
fn test_push_failure_stops_before_registry() {
    let run = run_with(
        "1.2.3",
        request(None, None, None),
        credentials(Some("https://npm.example.com/")),
        MockBuild::new,
        |log| MockVcs::failing_on(log, "push"),
        MockRegistry::new,
    );

    assert!(matches!(run.result, Err(NpError::Command { .. })));
    assert_eq!(run.calls.last().unwrap(), "git push origin HEAD");
    assert!(!run.calls.iter().any(|c| c.starts_with("login")));
}

#[test]
fn test_publish_failure_does_not_roll_back() {
    let run = run_with(
        "1.2.3",
        request(None, None, None),
        credentials(None),
        MockBuild::new,
        MockVcs::new,
        |log| MockRegistry::failing_on(log, "publish"),
    );

    assert!(run.result.is_err());
    assert_eq!(run.manifest_version, Version::new(1, 2, 4));
    assert!(run.calls.contains(&"git push origin HEAD".to_string()));
}

#[test]
fn test_dry_run_has_no_side_effects() {
    let mut args = request(None, Some(PreReleaseTag::Alpha), Some(1));
    args.dry_run = true;
    let run = run_ok("1.0.0", args, credentials(None));
    let result = run.result.unwrap();

    assert!(!result.published);
    assert_eq!(result.version.to_string(), "1.0.0-alpha.1");
    assert!(run.calls.is_empty());
    assert_eq!(run.manifest_version, Version::new(1, 0, 0));
    assert!(matches!(run.events.last(), Some(PublishEvent::Planned(steps)) if steps.len() == 7));
}

#[test]
fn test_non_increasing_version_warns_but_publishes() {
    let run = run_ok("2.0.0", request(Some("1.0.0"), None, None), credentials(None));
    let result = run.result.unwrap();

    let expected = PublishWarning::VersionNotIncreasing {
        current: "2.0.0".to_string(),
        next: "1.0.0".to_string(),
    };
    assert_eq!(result.warnings, vec![expected.clone()]);
    assert!(run.events.contains(&PublishEvent::Warning(expected)));
    assert!(result.published);
}

#[test]
fn test_events_report_selected_version_first() {
    let run = run_ok("1.2.3", request(None, None, None), credentials(None));
    run.result.unwrap();

    assert_eq!(
        run.events.first(),
        Some(&PublishEvent::VersionSelected {
            previous: Version::new(1, 2, 3),
            next: Version::new(1, 2, 4),
            change: VersionChange::Patch,
        })
    );
}
