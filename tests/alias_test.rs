//! Tests for alias expansion during dispatch

use rstest::rstest;

use toolbelt::application::{ApplicationError, Core, ToolCli};
use toolbelt::config::Settings;
use toolbelt::domain::{Alias, DomainError};
use toolbelt::exitcode;
use toolbelt::util::testing::{init_test_setup, CallLog, Harness, StubCommand};

struct Fixture {
    harness: Harness,
    hello: CallLog,
    foo: CallLog,
    bar: CallLog,
}

fn fixture(aliases: Vec<Alias>) -> Fixture {
    init_test_setup();
    let settings = Settings {
        aliases,
        ..Settings::defaults_for("my")
    };
    let hello = StubCommand::new("hello", "outputs hello world").with_message("hello world");
    let foo = StubCommand::new("foo", "foo something").with_message("foo");
    let bar = StubCommand::new("bar", "bar something").with_message("bar");
    let (hello_calls, foo_calls, bar_calls) = (hello.calls(), foo.calls(), bar.calls());
    let cli = ToolCli::new(
        "my",
        "test tool",
        Core::new(&settings).into_arc(),
        vec![
            hello.into_arc(),
            StubCommand::new("thing", "does something")
                .with_children(vec![foo.into_arc(), bar.into_arc()])
                .into_arc(),
        ],
    );
    Fixture {
        harness: Harness::new(settings, cli),
        hello: hello_calls,
        foo: foo_calls,
        bar: bar_calls,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[rstest]
fn given_alias_when_dispatching_then_runs_its_command() {
    let fx = fixture(vec![Alias::new("hi", "hello")]);

    fx.harness.run(&["hi"]).unwrap();

    assert_eq!(fx.harness.output.printed(), "hello world");
    assert_eq!(fx.hello.lock().unwrap().len(), 1);
}

#[rstest]
fn given_multi_word_alias_when_dispatching_then_appends_remaining_arguments() {
    let fx = fixture(vec![Alias::new("tf", "thing foo --quiet")]);

    fx.harness.run(&["tf", "a", "b c"]).unwrap();

    assert_eq!(
        fx.foo.lock().unwrap().as_slice(),
        [strings(&["--quiet", "a", "b c"])]
    );
    assert_eq!(
        fx.harness.output.system_lines(),
        vec!["<< my thing foo --quiet a b c\n", "\n>> "]
    );
}

#[rstest]
fn given_alias_shadowing_command_when_dispatching_then_alias_wins() {
    let fx = fixture(vec![Alias::new("hello", "bar")]);

    fx.harness.run(&["hello"]).unwrap();

    assert!(fx.hello.lock().unwrap().is_empty());
    assert_eq!(fx.bar.lock().unwrap().len(), 1);
}

#[rstest]
fn given_alias_to_alias_when_dispatching_then_expands_again() {
    let fx = fixture(vec![Alias::new("b", "tb"), Alias::new("tb", "thing bar")]);

    fx.harness.run(&["b"]).unwrap();

    assert_eq!(fx.bar.lock().unwrap().len(), 1);
}

#[rstest]
fn given_alias_not_first_when_dispatching_then_it_is_passed_verbatim() {
    let fx = fixture(vec![Alias::new("x", "hello")]);

    fx.harness.run(&["foo", "x"]).unwrap();

    assert_eq!(fx.foo.lock().unwrap().as_slice(), [strings(&["x"])]);
    assert!(fx.hello.lock().unwrap().is_empty());
}

#[rstest]
fn given_duplicate_aliases_when_dispatching_then_fails_fatally() {
    let fx = fixture(vec![Alias::new("dup", "hello"), Alias::new("dup", "thing foo")]);

    let err = fx.harness.run(&["dup"]).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::AmbiguousAlias(ref name)) if name == "dup"
    ));
    assert!(err.is_fatal());
    assert_eq!(err.to_string(), "found multiple aliases named: dup");
    assert!(fx.hello.lock().unwrap().is_empty());
    assert!(fx.foo.lock().unwrap().is_empty());
}

#[rstest]
fn given_duplicate_aliases_when_launching_then_exits_with_config_code() {
    let fx = fixture(vec![Alias::new("dup", "hello"), Alias::new("dup", "thing foo")]);

    let exit = fx.harness.tool.launch(&strings(&["dup"]));

    assert_eq!(exit, exitcode::CONFIG);
    assert_eq!(
        fx.harness.output.last_error().as_deref(),
        Some("found multiple aliases named: dup")
    );
}

#[rstest]
fn given_duplicate_aliases_when_dispatching_other_names_then_they_still_work() {
    let fx = fixture(vec![Alias::new("dup", "hello"), Alias::new("dup", "thing foo")]);

    fx.harness.run(&["bar"]).unwrap();

    assert_eq!(fx.bar.lock().unwrap().len(), 1);
}

#[rstest]
#[case::self_reference(vec![Alias::new("x", "x --again")], "x")]
#[case::two_step(vec![Alias::new("a", "b"), Alias::new("b", "a")], "a")]
fn given_alias_cycle_when_launching_then_fails_fatally_without_running(
    #[case] aliases: Vec<Alias>,
    #[case] first: &str,
) {
    let fx = fixture(aliases);

    let err = fx.harness.run(&[first]).unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::AliasCycle(_))));
    assert!(err.is_fatal());

    let exit = fx.harness.tool.launch(&strings(&[first]));
    assert_eq!(exit, exitcode::CONFIG);
    assert_eq!(
        fx.harness.output.last_error(),
        Some(format!("alias expands into itself: {first}"))
    );
    assert!(fx.harness.output.system_lines().is_empty());
}
