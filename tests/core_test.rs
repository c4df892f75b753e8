//! Tests for the built-in `core` commands

use std::path::PathBuf;

use rstest::{fixture, rstest};

use toolbelt::application::{ApplicationError, Core, ToolCli};
use toolbelt::config::Settings;
use toolbelt::exitcode;
use toolbelt::infrastructure::InfraError;
use toolbelt::util::testing::{init_test_setup, Harness};

#[fixture]
fn harness() -> Harness {
    init_test_setup();
    let settings = Settings {
        version: "1.2.3".into(),
        source_url: "https://github.com/me/ae.git".into(),
        source_dir: PathBuf::from("/tmp/ae"),
        bin_dir: PathBuf::from("/opt/bin"),
        ..Settings::defaults_for("my")
    };
    let cli = ToolCli::new("my", "test tool", Core::new(&settings).into_arc(), vec![]);
    Harness::new(settings, cli)
}

#[rstest]
#[case::search(&["version"])]
#[case::path(&["core", "version"])]
fn given_version_when_dispatching_then_outputs_configured_version(
    harness: Harness,
    #[case] arguments: &[&str],
) {
    harness.run(arguments).unwrap();

    assert_eq!(harness.output.printed(), "1.2.3");
}

#[rstest]
fn given_no_local_file_when_running_config_then_outputs_global_and_empty_local(harness: Harness) {
    harness.run(&["config"]).unwrap();

    assert_eq!(
        harness.output.printed(),
        "Global:\n    Source URL: https://github.com/me/ae.git\n    Source DIR: /tmp/ae\n    Bin DIR: /opt/bin\nLocal:\n    {}"
    );
}

#[rstest]
fn given_core_without_arguments_when_dispatching_then_describes_subcommands(harness: Harness) {
    harness.run(&["core"]).unwrap();

    assert_eq!(
        harness.output.printed(),
        "\
command which drives this thing

  config   >  output current config
  edit     >  open this project in the editor
  help     >  output description for given command
  reload   >  build & deploy tool to /opt/bin
  update   >  merge changes from https://github.com/me/ae.git
  version  >  output current version"
    );
}

#[rstest]
#[case::reload("reload", "make reload")]
#[case::update("update", "make update")]
fn given_make_target_when_running_then_outputs_shell_result_from_source_dir(
    harness: Harness,
    #[case] command: &str,
    #[case] command_line: &str,
) {
    harness.shell.respond(command_line, "done");

    harness.run(&[command]).unwrap();

    assert_eq!(harness.output.printed(), "done");
    assert_eq!(
        harness.shell.history(),
        vec![(command_line.to_string(), PathBuf::from("/tmp/ae"))]
    );
}

#[rstest]
fn given_edit_when_running_then_invokes_make_edit_silently(harness: Harness) {
    harness.shell.respond("make edit", "opened");

    harness.run(&["edit"]).unwrap();

    assert_eq!(harness.output.printed(), "");
    assert_eq!(harness.shell.history()[0].0, "make edit");
}

#[rstest]
fn given_failing_update_when_running_then_reports_status_and_message(harness: Harness) {
    harness
        .shell
        .fail("make update", 2, "fatal: not a git repository");

    let err = harness.run(&["update"]).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Infra(InfraError::Shell { status: 2, .. })
    ));
    assert_eq!(
        err.to_string(),
        "Status: 2\nMessage: fatal: not a git repository"
    );
    assert_eq!(
        harness.output.system_lines(),
        vec!["<< my core update\n", "\n>> "]
    );
}

#[rstest]
fn given_failing_reload_when_launching_then_exit_code_is_software(harness: Harness) {
    harness.shell.fail("make reload", 2, "make: *** No rule to make target");

    let exit = harness.tool.launch(&["reload".to_string()]);

    assert_eq!(exit, exitcode::SOFTWARE);
    assert_eq!(
        harness.output.last_error().as_deref(),
        Some("Status: 2\nMessage: make: *** No rule to make target")
    );
}
