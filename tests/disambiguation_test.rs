//! Tests for the interactive choice between commands sharing a name

use rstest::{fixture, rstest};

use toolbelt::application::{ApplicationError, Core, ToolCli};
use toolbelt::config::Settings;
use toolbelt::exitcode;
use toolbelt::util::testing::{init_test_setup, CallLog, Harness, StubCommand};

struct Fixture {
    harness: Harness,
    thing_foo: CallLog,
    other_foo: CallLog,
}

/// Two commands named "foo": `my thing foo` and `my other foo`.
#[fixture]
fn fx() -> Fixture {
    init_test_setup();
    let settings = Settings::defaults_for("my");
    let thing_foo = StubCommand::new("foo", "foo something").with_message("thing foo");
    let other_foo = StubCommand::new("foo", "foo otherwise").with_message("other foo");
    let (thing_calls, other_calls) = (thing_foo.calls(), other_foo.calls());
    let cli = ToolCli::new(
        "my",
        "test tool",
        Core::new(&settings).into_arc(),
        vec![
            StubCommand::new("thing", "does something")
                .with_children(vec![thing_foo.into_arc()])
                .into_arc(),
            StubCommand::new("other", "does other things")
                .with_children(vec![other_foo.into_arc()])
                .into_arc(),
        ],
    );
    Fixture {
        harness: Harness::new(settings, cli),
        thing_foo: thing_calls,
        other_foo: other_calls,
    }
}

const PROMPT: &str = "multiple commands found:\n\n1: my thing foo\n2: my other foo\n\nchoose number (0 to cancel):";

#[rstest]
fn given_valid_choice_when_dispatching_then_runs_chosen_command(fx: Fixture) {
    fx.harness.input.push("2");

    fx.harness.run(&["foo", "arg"]).unwrap();

    assert_eq!(fx.harness.output.printed(), format!("{PROMPT}\n\nother foo"));
    assert!(fx.thing_foo.lock().unwrap().is_empty());
    assert_eq!(fx.other_foo.lock().unwrap().as_slice(), [vec!["arg".to_string()]]);
    assert_eq!(
        fx.harness.output.system_lines(),
        vec!["<< my other foo arg\n", "\n>> "]
    );
}

#[rstest]
fn given_padded_answer_when_choosing_then_whitespace_is_ignored(fx: Fixture) {
    fx.harness.input.push(" 1 ");

    fx.harness.run(&["foo"]).unwrap();

    assert_eq!(fx.thing_foo.lock().unwrap().len(), 1);
}

#[rstest]
fn given_zero_when_choosing_then_dispatch_is_cancelled_silently(fx: Fixture) {
    fx.harness.input.push("0");

    let exit = fx.harness.tool.launch(&["foo".to_string()]);

    assert_eq!(exit, exitcode::OK);
    assert_eq!(fx.harness.output.last_error(), None);
    assert!(fx.thing_foo.lock().unwrap().is_empty());
    assert!(fx.other_foo.lock().unwrap().is_empty());
}

#[rstest]
#[case::out_of_range("3")]
#[case::negative("-1")]
#[case::not_a_number("two")]
#[case::empty("")]
fn given_bad_answer_when_choosing_then_fails_with_invalid_choice(fx: Fixture, #[case] answer: &str) {
    fx.harness.input.push(answer);

    let err = fx.harness.run(&["foo"]).unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidChoice));
    assert_eq!(err.to_string(), "invalid choice");
}

#[rstest]
fn given_end_of_input_when_choosing_then_fails_with_invalid_choice(fx: Fixture) {
    let err = fx.harness.run(&["foo"]).unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidChoice));
    assert_eq!(fx.harness.tool.launch(&["foo".to_string()]), exitcode::USAGE);
}

#[rstest]
fn given_ambiguous_name_when_requesting_help_then_prompts_too(fx: Fixture) {
    fx.harness.input.push("2");

    let text = fx
        .harness
        .tool
        .cli()
        .help_text(&["foo".to_string()], &fx.harness.tool)
        .unwrap();

    assert_eq!(text, "# my other foo\n> foo otherwise");
    assert_eq!(fx.harness.input.remaining(), 0);
}

#[rstest]
fn given_path_with_ambiguous_name_when_requesting_help_then_walks_without_prompt(fx: Fixture) {
    let text = fx
        .harness
        .tool
        .cli()
        .help_text(&["other".to_string(), "foo".to_string()], &fx.harness.tool)
        .unwrap();

    assert_eq!(text, "# my other foo\n> foo otherwise");
}

#[rstest]
fn given_zero_inside_help_when_launching_then_exits_ok_after_footer(fx: Fixture) {
    fx.harness.input.push("0");

    let exit = fx
        .harness
        .tool
        .launch(&["core".to_string(), "help".to_string(), "foo".to_string()]);

    assert_eq!(exit, exitcode::OK);
    assert_eq!(fx.harness.output.printed(), format!("{PROMPT}\n"));
    assert_eq!(
        fx.harness.output.system_lines(),
        vec!["<< my core help foo\n", "\n>> "]
    );
    assert_eq!(fx.harness.output.last_error(), None);
}
