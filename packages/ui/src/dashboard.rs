//! The signed-in view.

use api::{run_date_fetch, DateClient, FetchGeneration, FetchResult};
use dioxus::prelude::*;

use crate::auth::use_auth;

/// Dashboard shown while a user is signed in.
///
/// Expects a [`DateClient`] in context for the date card.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let mut logout_error = use_signal(|| Option::<String>::None);

    let user = auth.current_user();
    let email = user.as_ref().map(|u| u.email.clone()).unwrap_or_default();
    let username = user
        .as_ref()
        .map(|u| u.username().to_string())
        .unwrap_or_default();

    let handle_logout = move |_: MouseEvent| {
        let store = auth.store();
        async move {
            logout_error.set(None);
            if let Err(err) = store.logout().await {
                logout_error.set(Some(format!("Failed to log out: {err}")));
            }
        }
    };

    rsx! {
        div {
            class: "dashboard-container",

            header {
                class: "dashboard-header",
                h1 { "Secure Dashboard" }
                div {
                    class: "user-info",
                    span { class: "user-email", "{email}" }
                    button {
                        class: "btn-logout",
                        onclick: handle_logout,
                        "Log Out"
                    }
                }
            }

            if let Some(err) = logout_error() {
                p { class: "error-text", "{err}" }
            }

            main {
                class: "dashboard-main",

                div {
                    class: "welcome-card",
                    h2 { "Welcome, {username}!" }
                    p {
                        class: "success-message",
                        "You are successfully authenticated."
                    }
                }

                div {
                    class: "info-card",
                    h3 { "Authentication" }
                    p {
                        "Sign-in is handled by an external identity provider. Features include:"
                    }
                    ul {
                        li { "Email/Password Authentication" }
                        li { "Secure Token Management" }
                        li { "Real-time Auth State" }
                        li { "Protected API Routes" }
                    }
                }

                div {
                    class: "api-card",
                    h3 { "API Integration" }
                    p {
                        "This project combines a Dioxus frontend with an axum backend."
                    }
                    div {
                        class: "date-display",
                        h4 { "Server Date (Authenticated Request):" }
                        DateCard {}
                    }
                }
            }
        }
    }
}

/// Fetches the server date once per mount and whenever the auth store is replaced.
#[component]
pub fn DateCard() -> Element {
    let auth = use_auth();
    let client = use_context::<DateClient>();
    let mut result = use_signal(FetchResult::default);
    let generation = use_hook(FetchGeneration::new);

    let on_unmount = generation.clone();
    use_drop(move || on_unmount.invalidate());

    let store = auth.store();
    use_effect(use_reactive(&store, move |store| {
        let client = client.clone();
        let generation = generation.clone();
        spawn(async move {
            run_date_fetch(&client, &store, &generation, |next| result.set(next)).await;
        });
    }));

    match result() {
        FetchResult::Loading => rsx! {
            p { class: "loading-text", "Loading date..." }
        },
        FetchResult::Loaded(date) => rsx! {
            p { class: "date-text", "{date}" }
        },
        FetchResult::Failed(error) => rsx! {
            p { class: "error-text", "{error}" }
        },
    }
}
