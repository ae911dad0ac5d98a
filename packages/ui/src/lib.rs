//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{use_auth, AuthContext, AuthProvider};

mod screen;
pub use screen::{screen_for, FormMode, Screen};

mod forms;
pub use forms::{CredentialsForm, CredentialsView, FormState, Login, Register};

mod dashboard;
pub use dashboard::{Dashboard, DateCard};

mod app;
pub use app::AppContent;
