//! Heron Console - operator shell for the HR backend
//!
//! 支持命令行子命令形式的界面：每个 HR 功能一个 screen，
//! screen 持有列表状态、本地过滤和页面级错误。
//!
//! The console owns configuration, logging, the application state
//! machine and notifications; all HTTP goes through `heron-client`.

pub mod app;
pub mod cli;
pub mod guard;
pub mod notify;
pub mod screens;
pub mod utils;

pub use app::{App, AppConfig, AppState, ConsoleError};
pub use guard::{Access, Gate};
pub use notify::{Notifier, Toast, ToastLevel};
