mod common;

use common::*;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use queuesim::repl::events::ModelEvent;
use queuesim::repl::io::{MockEventStream, MockRenderStream};
use queuesim::repl::models::{SimulationDraft, SimulationResult};
use queuesim::AppController;
use serde_json::json;
use wiremock::MockServer;

type TestController = AppController<MockEventStream, MockRenderStream>;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn controller_for(server: &MockServer) -> (TestController, MockRenderStream) {
    controller_with(server, SimulationDraft::new(), (100, 60))
}

fn controller_with(
    server: &MockServer,
    draft: SimulationDraft,
    size: (u16, u16),
) -> (TestController, MockRenderStream) {
    let render_stream = MockRenderStream::with_size(size);
    let screen = render_stream.clone();
    let app = AppController::with_profile(
        "default",
        &profile_for(server),
        draft,
        MockEventStream::empty(),
        render_stream,
    )
    .unwrap();
    (app, screen)
}

fn draft_with_stations(count: usize) -> SimulationDraft {
    let rates: Vec<String> = (0..count).map(|i| format!("{}", i + 1)).collect();
    let servers: Vec<String> = vec!["2".to_string(); count];
    let mut draft = SimulationDraft::new();
    draft.replace_stations(&rates, &servers).unwrap();
    draft
}

#[tokio::test]
async fn enter_should_run_simulation_and_show_results() {
    let server = start_simulation_server().await;
    stub_json(&server, 200, metrics(3.456, 1.234)).await;
    let (mut app, screen) = controller_for(&server);

    app.handle_event(key(KeyCode::Enter)).unwrap();

    assert!(app.view_model().is_loading());
    assert!(screen.get_plain_text().contains("[ Simulating... ]"));

    let event = app.wait_for_response().await.unwrap();

    assert!(matches!(event, Some(ModelEvent::SimulationSucceeded { .. })));
    assert!(!app.view_model().is_loading());
    assert_eq!(
        app.view_model().current_result(),
        Some(&SimulationResult::new(3.456, 1.234))
    );
    let text = screen.get_plain_text();
    assert!(text.contains("Average Queue Length (L): 3.46"));
    assert!(text.contains("Average Wait Time (W): 1.23"));
    assert!(text.contains("[ Run Simulation ]"));
    assert!(text.contains("● 200"));
}

#[tokio::test]
async fn service_error_should_replace_previous_result() {
    let server = start_simulation_server().await;
    stub_json_times(&server, 200, metrics(2.0, 1.0), 1).await;
    stub_json(&server, 400, json!({ "error": "invalid lambda" })).await;
    let (mut app, screen) = controller_for(&server);

    app.handle_event(key(KeyCode::Enter)).unwrap();
    app.wait_for_response().await.unwrap();
    assert!(app.view_model().current_result().is_some());

    app.handle_event(key(KeyCode::Enter)).unwrap();
    let event = app.wait_for_response().await.unwrap();

    assert_eq!(
        event,
        Some(ModelEvent::SimulationFailed {
            seq: 2,
            message: "invalid lambda".to_string()
        })
    );
    assert_eq!(app.view_model().current_result(), None);
    assert_eq!(app.view_model().current_error(), Some("invalid lambda"));
    let text = screen.get_plain_text();
    assert!(text.contains("invalid lambda"));
    assert!(!text.contains("Average Queue Length (L)"));
}

#[tokio::test]
async fn enter_while_loading_should_not_issue_second_request() {
    let server = start_simulation_server().await;
    stub_json(&server, 200, metrics(1.0, 1.0)).await;
    let (mut app, _) = controller_for(&server);

    app.handle_event(key(KeyCode::Enter)).unwrap();
    app.handle_event(key(KeyCode::Enter)).unwrap();
    app.wait_for_response().await.unwrap();

    assert!(!app.view_model().is_loading());
    assert_eq!(app.view_model().store().latest_issued(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn added_station_should_be_sent_with_request() {
    let server = start_simulation_server().await;
    stub_json(&server, 200, metrics(1.0, 1.0)).await;
    let (mut app, _) = controller_for(&server);

    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('n'),
        KeyModifiers::CONTROL,
    )))
    .unwrap();
    app.handle_event(key(KeyCode::Enter)).unwrap();
    app.wait_for_response().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["service_rates"], json!([1.0, 1.2, 1.0]));
    assert_eq!(body["num_servers"], json!([2, 2, 2]));
}

#[tokio::test]
async fn results_should_be_visible_on_80x24_with_four_stations() {
    let server = start_simulation_server().await;
    stub_json(&server, 200, metrics(3.456, 1.234)).await;
    let (mut app, screen) = controller_with(&server, draft_with_stations(4), (80, 24));

    app.handle_event(key(KeyCode::Enter)).unwrap();
    app.wait_for_response().await.unwrap();

    assert!(app.view_model().current_result().is_some());
    let text = screen.get_plain_text();
    assert!(text.contains("Average Queue Length (L): 3.46"));
    assert!(text.contains("Average Wait Time (W): 1.23"));
}

#[tokio::test]
async fn error_should_be_visible_on_80x24_with_five_stations() {
    let server = start_simulation_server().await;
    stub_json(&server, 400, json!({ "error": "invalid lambda" })).await;
    let (mut app, screen) = controller_with(&server, draft_with_stations(5), (80, 24));

    app.handle_event(key(KeyCode::Enter)).unwrap();
    app.wait_for_response().await.unwrap();

    assert_eq!(app.view_model().current_error(), Some("invalid lambda"));
    assert!(screen.get_plain_text().contains("invalid lambda"));
}

#[tokio::test]
async fn tabbing_to_submit_should_keep_results_on_small_terminal() {
    let server = start_simulation_server().await;
    stub_json(&server, 200, metrics(3.456, 1.234)).await;
    let (mut app, screen) = controller_with(&server, draft_with_stations(4), (80, 24));
    app.handle_event(key(KeyCode::Enter)).unwrap();
    app.wait_for_response().await.unwrap();

    // Shift-Tab from the first input wraps round to the submit button
    app.handle_event(key(KeyCode::BackTab)).unwrap();

    let text = screen.get_plain_text();
    assert!(text.contains("▸ [ Run Simulation ]"));
    assert!(text.contains("Average Queue Length (L): 3.46"));
}
