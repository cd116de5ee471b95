//! Application state machine
//!
//! 用于路由守卫和状态展示，登录/登出在这里统一处理。

use heron_client::{home_for_user, HeronClient, HomeRoute};
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;

use crate::app::config::AppConfig;
use crate::app::error::ConsoleError;
use crate::notify::Notifier;

/// Console state used by the route guard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AppState {
    /// Session restore in progress
    Starting,
    /// No usable session
    LoggedOut,
    /// Signed in, home resolved from the role
    Active { user: UserInfo, home: HomeRoute },
}

impl AppState {
    /// Whether the login prompt should be shown
    pub fn needs_login(&self) -> bool {
        matches!(self, AppState::LoggedOut)
    }

    /// Whether a signed-in user is present
    pub fn is_active(&self) -> bool {
        matches!(self, AppState::Active { .. })
    }

    /// Landing route of the signed-in user
    pub fn home_route(&self) -> Option<HomeRoute> {
        match self {
            AppState::Active { home, .. } => Some(*home),
            _ => None,
        }
    }

    /// The signed-in user
    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            AppState::Active { user, .. } => Some(user),
            _ => None,
        }
    }
}

/// Console application: one client, one config, one notifier
pub struct App {
    client: HeronClient,
    config: AppConfig,
    notifier: Notifier,
    state: AppState,
}

impl App {
    /// Restore the persisted session and resolve the initial state
    pub async fn init(config: AppConfig) -> Self {
        let notifier = Notifier::new();
        let client = HeronClient::new(config.client_config()).await;

        let mut app = Self {
            client,
            config,
            notifier,
            state: AppState::Starting,
        };
        app.state = app.resolve_state().await;
        app
    }

    /// Reconcile the session with the backend and map it to a state.
    ///
    /// `check_session` absorbs transient failures; a session without an
    /// identity record still ends at the login prompt because no home
    /// route can be resolved for it.
    async fn resolve_state(&self) -> AppState {
        if !self.client.session().check_session().await {
            return AppState::LoggedOut;
        }
        match self.client.session().current_user().await {
            Some(user) => {
                let home = home_for_user(&user);
                AppState::Active { user, home }
            }
            None => AppState::LoggedOut,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn client(&self) -> &HeronClient {
        &self.client
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Sign in; both outcomes produce a toast
    pub async fn login(&mut self, username: &str, password: &str) -> Result<UserInfo, ConsoleError> {
        match self.client.session().login(username, password).await {
            Ok(user) => {
                let home = home_for_user(&user);
                self.notifier
                    .success(format!("Signed in as {}", user.username));
                self.state = AppState::Active {
                    user: user.clone(),
                    home,
                };
                Ok(user)
            }
            Err(e) => {
                self.state = AppState::LoggedOut;
                self.notifier.error(format!("Login failed: {e}"));
                Err(e.into())
            }
        }
    }

    /// Sign out; local state clears regardless of the backend call
    pub async fn logout(&mut self) {
        self.client.session().logout().await;
        self.state = AppState::LoggedOut;
        self.notifier.info("Signed out");
    }
}
