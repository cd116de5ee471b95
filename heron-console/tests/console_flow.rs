// heron-console/tests/console_flow.rs
// 控制台集成测试

use std::sync::atomic::Ordering;

use heron_api_mock::MockServer;
use heron_client::HomeRoute;
use heron_console::guard::{self, Access, Gate};
use heron_console::screens::{LeaveScreen, OrganizationsScreen, PayslipsScreen};
use heron_console::{App, AppConfig, ConsoleError, ToastLevel};
use shared::models::{LeaveStatus, OrganizationCreate};
use tempfile::TempDir;

fn console_config(mock: &MockServer, dir: &TempDir) -> AppConfig {
    AppConfig {
        api_url: mock.core_url.clone(),
        recruitment_url: Some(mock.recruitment_url.clone()),
        session_dir: dir.path().to_path_buf(),
        timeout_secs: 5,
        log_level: "info".to_string(),
        log_dir: None,
    }
}

async fn hr_app(mock: &MockServer, dir: &TempDir) -> App {
    let mut app = App::init(console_config(mock, dir)).await;
    app.login("grace", "grace123").await.unwrap();
    app
}

#[tokio::test]
async fn test_init_without_session_starts_logged_out() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();

    let app = App::init(console_config(&mock, &dir)).await;
    assert!(app.state().needs_login());
    assert!(app.state().home_route().is_none());
}

#[tokio::test]
async fn test_login_resolves_hr_home() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let mut app = App::init(console_config(&mock, &dir)).await;
    let mut toasts = app.notifier().subscribe();

    let user = app.login("grace", "grace123").await.unwrap();
    assert_eq!(user.username, "grace");
    assert!(app.state().is_active());
    assert_eq!(app.state().home_route(), Some(HomeRoute::Hr));

    let toast = toasts.try_recv().unwrap();
    assert_eq!(toast.level, ToastLevel::Success);
    assert!(toast.message.contains("grace"));
}

#[tokio::test]
async fn test_login_failure_toasts_and_stays_logged_out() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let mut app = App::init(console_config(&mock, &dir)).await;
    let mut toasts = app.notifier().subscribe();

    let err = app.login("grace", "wrong").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Client(_)));
    assert!(app.state().needs_login());

    let toast = toasts.try_recv().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert!(toast.message.contains("Login failed"));
}

#[tokio::test]
async fn test_logout_clears_state_and_session() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let mut app = hr_app(&mock, &dir).await;

    app.logout().await;

    assert!(app.state().needs_login());
    assert!(!app.client().session().is_authenticated().await);
}

#[tokio::test]
async fn test_employee_user_redirected_from_hr_screens() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let mut app = App::init(console_config(&mock, &dir)).await;

    app.login("erin", "erin123").await.unwrap();
    assert_eq!(app.state().home_route(), Some(HomeRoute::Employee));

    assert_eq!(
        guard::resolve(app.state(), Access::Hr),
        Gate::Redirect(HomeRoute::Employee)
    );
    // Shared screens still open
    assert_eq!(guard::resolve(app.state(), Access::SignedIn), Gate::Allow);
}

#[tokio::test]
async fn test_restart_restores_active_state() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    {
        hr_app(&mock, &dir).await;
    }

    // New process over the same session directory
    let app = App::init(console_config(&mock, &dir)).await;
    assert!(app.state().is_active());
    assert_eq!(app.state().user().map(|u| u.username.as_str()), Some("grace"));
    assert_eq!(app.state().home_route(), Some(HomeRoute::Hr));
}

#[tokio::test]
async fn test_organizations_screen_loads_filters_and_patches_locally() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let app = hr_app(&mock, &dir).await;

    let mut screen = OrganizationsScreen::new(app.client(), app.notifier().clone());
    screen.load().await.unwrap();
    assert_eq!(screen.items().len(), 2);
    assert_eq!(mock.state.org_list_calls.load(Ordering::SeqCst), 1);

    screen.set_search("people");
    let visible = screen.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "People Operations");

    // Mutations patch the local list without refetching
    let created = screen
        .create(OrganizationCreate {
            name: "Design".to_string(),
            description: None,
            parent_id: None,
        })
        .await
        .unwrap();
    assert_eq!(screen.items().len(), 3);

    let renamed = screen.rename(created.id, "Design Studio").await.unwrap();
    assert_eq!(renamed.name, "Design Studio");
    assert!(screen
        .items()
        .iter()
        .any(|o| o.id == created.id && o.name == "Design Studio"));
    assert_eq!(mock.state.org_list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_screen_failure_sets_page_error_and_toasts() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let app = hr_app(&mock, &dir).await;

    let mut screen = OrganizationsScreen::new(app.client(), app.notifier().clone());
    screen.load().await.unwrap();

    let mut toasts = app.notifier().subscribe();
    let err = screen.rename(999_999, "Ghost").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Client(_)));
    assert!(screen.error().unwrap().contains("Failed to rename"));

    let toast = toasts.try_recv().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
}

#[tokio::test]
async fn test_validation_failure_stays_inline() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let app = hr_app(&mock, &dir).await;

    let mut screen = OrganizationsScreen::new(app.client(), app.notifier().clone());
    screen.load().await.unwrap();
    let before = screen.items().len();

    let mut toasts = app.notifier().subscribe();
    let err = screen
        .create(OrganizationCreate {
            name: String::new(),
            description: None,
            parent_id: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Validation(_)));
    assert!(screen.error().is_some());
    assert_eq!(screen.items().len(), before);
    // Inline page error only, no toast
    assert!(toasts.try_recv().is_err());
}

#[tokio::test]
async fn test_leave_screen_filters_by_status_and_approves() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let app = hr_app(&mock, &dir).await;

    let mut screen = LeaveScreen::new(app.client(), app.notifier().clone());
    screen.load().await.unwrap();
    assert_eq!(screen.items().len(), 2);

    screen.set_status_filter(Some(LeaveStatus::Pending));
    let pending = screen.visible();
    assert_eq!(pending.len(), 1);
    let id = pending[0].id;

    let approved = screen.approve(id, Some("ok".to_string())).await.unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved);
    assert!(screen.visible().is_empty());
    assert_eq!(screen.items().len(), 2);
}

#[tokio::test]
async fn test_payslips_screen_filters_and_totals() {
    let mock = MockServer::spawn().await;
    let dir = TempDir::new().unwrap();
    let app = hr_app(&mock, &dir).await;

    let mut screen = PayslipsScreen::new(app.client(), app.notifier().clone());
    screen.load().await.unwrap();
    assert_eq!(screen.items().len(), 3);

    screen.set_period_filter(Some("2026-07".to_string()));
    assert_eq!(screen.visible().len(), 2);
    assert_eq!(screen.total_net(), 6255.5);

    screen.set_employee_filter(Some(201));
    assert_eq!(screen.visible().len(), 1);
    assert_eq!(screen.total_net(), 3510.4);
}
