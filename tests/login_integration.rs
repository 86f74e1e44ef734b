use loginflow::browser::{LaunchOptions, Session};
use loginflow::dom::{resolve_login, CdpPage};
use loginflow::flow::{run_flow, SessionRunner};
use loginflow::report::ReportConfig;
use serde_json::json;

const LOGIN_PAGE: &str = "data:text/html,<html><body>\
    <input id='em' type='email' placeholder='Email address'>\
    <input type='password' name='pwd'>\
    <button type='submit'>Sign in</button>\
    </body></html>";

#[test]
#[ignore] // Requires Chrome to be installed, run with: cargo test -- --ignored
fn test_resolve_login_on_live_page() {
    let mut session = Session::new(LaunchOptions::new().headless(true));
    session.navigate(LOGIN_PAGE).expect("Failed to navigate");

    // Small delay to let the page render
    std::thread::sleep(std::time::Duration::from_millis(500));

    let page = CdpPage::new(session.page().expect("No page"));
    let found = resolve_login(&page).expect("Failed to resolve");

    assert_eq!(found.username.selector.as_deref(), Some("#em"));
    assert!(found.username.score > 0);
    assert_eq!(found.password.selector.as_deref(), Some("input[name='pwd']"));
    assert!(found.password.score > 0);
    assert!(found.button.selector.is_some());
    assert!(found.button.score > 0);

    session.close().expect("Failed to close");
}

#[test]
#[ignore]
fn test_resolution_is_stable_across_scans() {
    let mut session = Session::new(LaunchOptions::new().headless(true));
    session.navigate(LOGIN_PAGE).expect("Failed to navigate");

    std::thread::sleep(std::time::Duration::from_millis(500));

    let page = CdpPage::new(session.page().expect("No page"));
    let first = resolve_login(&page).expect("First scan failed");
    let second = resolve_login(&page).expect("Second scan failed");

    assert_eq!(first, second);

    session.close().expect("Failed to close");
}

#[test]
#[ignore]
fn test_run_flow_against_live_page() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = ReportConfig {
        reports_dir: dir.path().join("reports"),
        screenshots_dir: dir.path().join("screenshots"),
    };

    let mut session = Session::new(LaunchOptions::new().headless(true));
    let mut runner = SessionRunner::new(&mut session, &config);

    let steps = vec![
        json!({"action": "navigate", "url": LOGIN_PAGE}),
        json!({"action": "fill", "selector": "#em", "text": "alice@co.com"}),
        json!({"action": "fill", "selector": "#does-not-exist", "text": "x"}),
        json!({"action": "wait_for", "selector": "body"}),
        json!({"action": "close"}),
    ];

    let report = run_flow(&mut runner, &steps);

    // One broken selector fails its step and only its step
    assert_eq!(report.results.len(), 5);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.results[2].output["error"], "element '#does-not-exist' not found");
    assert_eq!(report.results[4].output["status"], "browser_closed");
}
