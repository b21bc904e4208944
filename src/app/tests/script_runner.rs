use crate::app::App;
use crate::config::Config;

fn run(start: &str, script: &str) -> (String, crate::app::ScriptReport) {
    let mut app = App::new_with_config(Config::default(), start).expect("app init");
    let mut out = Vec::new();
    let report = app.run_script(script, &mut out).expect("script runs");
    (String::from_utf8(out).expect("utf8 output"), report)
}

#[test]
fn script_prints_page_after_each_navigation() {
    let (output, report) = run(
        "/",
        "# tour\nclick About\n\nback\nforward\nstate\n",
    );

    assert_eq!(report.executed, 4);
    assert_eq!(report.failed, 0);
    assert!(!report.quit);

    let headers: Vec<&str> = output.lines().filter(|line| line.starts_with('[')).collect();
    assert_eq!(
        headers,
        vec![
            "[/] page=index history=1 renders=1",
            "[/about] page=about history=2 renders=2",
            "[/] page=index history=2 renders=3",
            "[/about] page=about history=2 renders=4",
        ]
    );
    assert!(output.contains("  # About"));
    assert!(output.contains("\"trigger\": \"history-pop\""));
}

#[test]
fn failing_commands_are_reported_and_skipped() {
    let (output, report) = run("/", "click Pricing\nfrobnicate\nclick Contact\n");

    assert_eq!(report.executed, 3);
    assert_eq!(report.failed, 2);
    assert!(output.contains("error (line 1):"));
    assert!(output.contains("error (line 2): invalid argument: unknown command `frobnicate`"));
    assert!(output.contains("[/contact] page=contact history=2 renders=2"));
}

#[test]
fn quit_stops_the_script() {
    let (output, report) = run("/", "quit\nclick About\n");
    assert!(report.quit);
    assert_eq!(report.executed, 1);
    assert!(!output.contains("/about"));
}

#[test]
fn go_counts_as_a_full_load() {
    let (output, _report) = run("/", "go /contact?debug=true\n");
    assert!(output.contains("[/contact?debug=true] page=contact history=2 renders=1"));
}
