//! Top-level view switching.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::dashboard::Dashboard;
use crate::forms::{CredentialsView, Login, Register};
use crate::screen::{screen_for, Screen};

/// Dashboard when signed in; otherwise the login or registration form.
///
/// The form view is local state and survives sign-in/sign-out cycles.
#[component]
pub fn AppContent() -> Element {
    let auth = use_auth();
    let view = use_signal(CredentialsView::default);
    let mode = view.read().mode;

    match screen_for(&auth.session(), mode) {
        Screen::Dashboard => rsx! {
            Dashboard {}
        },
        Screen::Login => rsx! {
            Login { view: view }
        },
        Screen::Register => rsx! {
            Register { view: view }
        },
    }
}
