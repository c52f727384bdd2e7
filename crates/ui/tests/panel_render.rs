use dashchat_client::{MockQueryService, MockResponse};
use dashchat_core::{AssistantConfig, DashboardContext, MemoryWidthStore, PanelConfig};
use dashchat_ui::{App, AppState, ShellSettings, SidebarWidth};
use ratatui::{Terminal, backend::TestBackend};
use std::sync::Arc;
use std::time::Duration;

fn app_with(responses: Vec<MockResponse>, delay: Duration) -> App {
    let settings = ShellSettings::new(&AssistantConfig::default(), DashboardContext::Slug("sales-q3".to_string()))
        .with_service_label("offline (mock)");
    let sidebar = SidebarWidth::load(PanelConfig::default(), Arc::new(MemoryWidthStore::new()));
    let service = Arc::new(MockQueryService::new(responses).with_delay(delay));
    App::new(AppState::new(settings, sidebar), service)
}

fn screen(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_closed_shell_shows_dashboard_and_rail() {
    let mut app = app_with(Vec::new(), Duration::ZERO);
    let text = screen(&mut app, 100, 24);

    assert!(text.contains("Dashboard"));
    assert!(text.contains("sales-q3"));
    assert!(text.contains("offline (mock)"));
    assert!(text.contains("[Ctrl+O] assistant"));
    assert!(!text.contains("(Beta)"));
}

#[test]
fn test_open_panel_shows_header_greeting_and_input() {
    let mut app = app_with(Vec::new(), Duration::ZERO);
    app.open_panel();
    let text = screen(&mut app, 120, 30);

    assert!(text.contains("AI Assistant (Beta)"));
    assert!(text.contains("[Ctrl+O] close"));
    assert!(text.contains("Welcome! How can I help you"));
    assert!(text.contains("Send"));
}

#[tokio::test(start_paused = true)]
async fn test_loading_indicator_while_pending() {
    let mut app = app_with(vec![MockResponse::text("done")], Duration::from_secs(30));
    app.open_panel();
    app.state_mut().session_mut().unwrap().draft.insert_str("What is churn?");
    assert!(app.submit());

    let text = screen(&mut app, 120, 30);
    assert!(text.contains("What is churn?"));
    assert!(text.contains("Thinking…"));
    assert!(text.contains("Waiting for the assistant..."));

    let event = app.recv_query_event().await.unwrap();
    assert!(app.handle_query_event(event));
    let text = screen(&mut app, 120, 30);
    assert!(!text.contains("Thinking…"));
    assert!(text.contains("done"));
}

#[tokio::test]
async fn test_structured_answer_renders_table_and_code() {
    let mut app = app_with(
        vec![MockResponse::text(
            "Revenue by region:\n\n| Region | Revenue |\n|---|--:|\n| North | $1.2M |\n\n```sql\nSELECT region FROM sales;\n```",
        )],
        Duration::ZERO,
    );
    app.open_panel();
    app.state_mut().session_mut().unwrap().draft.insert_str("Revenue by region?");
    app.submit();
    let event = app.recv_query_event().await.unwrap();
    app.handle_query_event(event);

    let text = screen(&mut app, 120, 40);
    assert!(text.contains("│ Region │ Revenue │"));
    assert!(text.contains("│ North  │   $1.2M │"));
    assert!(text.contains("┌─ SQL"));
    assert!(text.contains("SELECT region FROM sales;"));
}

#[tokio::test]
async fn test_user_table_is_shown_literally() {
    let mut app = app_with(vec![MockResponse::text("ok")], Duration::ZERO);
    app.open_panel();
    app.state_mut().session_mut().unwrap().draft.insert_str("| a | b |");
    app.submit();

    let text = screen(&mut app, 120, 30);
    assert!(text.contains("┃ | a | b |"));
    assert!(!text.contains("│ a │ b │"));
}

#[test]
fn test_narrow_sidebar_truncates_wide_table() {
    let mut app = app_with(Vec::new(), Duration::ZERO);
    app.state_mut().settings.greeting =
        "| Region | Description |\n|---|---|\n| North | Includes every northern territory and subsidiary |".to_string();
    app.state_mut().sidebar.resize(32);
    app.open_panel();

    let text = screen(&mut app, 100, 30);
    assert!(text.contains("…"));
    assert!(text.contains("Region"));
}
