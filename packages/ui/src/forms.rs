//! Login and registration forms.

use api::AuthError;
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::screen::FormMode;

/// Contents of the credentials form currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl FormState {
    /// Clear the previous error and return the credentials to submit.
    pub fn begin_submit(&mut self) -> (String, String) {
        self.error = None;
        self.submitting = true;
        (self.email.trim().to_string(), self.password.clone())
    }

    pub fn fail(&mut self, err: &AuthError) {
        self.submitting = false;
        self.error = Some(err.message.clone());
    }

    pub fn succeed(&mut self) {
        self.submitting = false;
        self.password.clear();
    }
}

/// Which credentials form is showing, and what it holds.
///
/// Toggling swaps the mode and starts a blank [`FormState`]. `epoch` counts toggles so
/// a submission that settles after the user switched forms is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialsView {
    pub mode: FormMode,
    pub form: FormState,
    epoch: u64,
}

impl CredentialsView {
    pub fn toggle(&mut self) {
        self.mode = self.mode.toggled();
        self.form = FormState::default();
        self.epoch += 1;
    }

    /// Start a submission. Returns the epoch to settle it with and the credentials.
    pub fn begin_submit(&mut self) -> (u64, String, String) {
        let (email, password) = self.form.begin_submit();
        (self.epoch, email, password)
    }

    /// Apply the outcome of the submission started at `epoch`, unless the form was
    /// switched since.
    pub fn settle<T>(&mut self, epoch: u64, result: &Result<T, AuthError>) -> bool {
        if epoch != self.epoch {
            return false;
        }
        match result {
            Ok(_) => self.form.succeed(),
            Err(err) => self.form.fail(err),
        }
        true
    }
}

#[component]
pub fn Login(view: Signal<CredentialsView>) -> Element {
    rsx! {
        CredentialsForm { view: view }
    }
}

#[component]
pub fn Register(view: Signal<CredentialsView>) -> Element {
    rsx! {
        CredentialsForm { view: view }
    }
}

/// Email and password form that signs in or registers depending on the view's mode.
#[component]
pub fn CredentialsForm(view: Signal<CredentialsView>) -> Element {
    let auth = use_auth();
    let mut view = view;

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let store = auth.store();
        spawn(async move {
            let mode = view.read().mode;
            let (epoch, email, password) = view.write().begin_submit();
            let result = match mode {
                FormMode::Login => store.login(&email, &password).await,
                FormMode::Register => store.register(&email, &password).await,
            };
            view.write().settle(epoch, &result);
        });
    };

    let CredentialsView { mode, form: state, .. } = view();
    let title = mode.title();
    let submit_label = mode.submit_label(state.submitting);
    let (prompt, link) = mode.toggle_prompt();

    rsx! {
        div {
            class: "auth-container",

            div {
                class: "auth-card",

                h2 { "{title}" }

                if let Some(err) = state.error.clone() {
                    div { class: "error-message", "{err}" }
                }

                form {
                    onsubmit: handle_submit,

                    div {
                        class: "form-group",
                        label { r#for: "{mode}-email", "Email" }
                        input {
                            id: "{mode}-email",
                            r#type: "email",
                            required: true,
                            value: "{state.email}",
                            oninput: move |evt: FormEvent| view.write().form.email = evt.value(),
                        }
                    }

                    div {
                        class: "form-group",
                        label { r#for: "{mode}-password", "Password" }
                        input {
                            id: "{mode}-password",
                            r#type: "password",
                            required: true,
                            value: "{state.password}",
                            oninput: move |evt: FormEvent| view.write().form.password = evt.value(),
                        }
                    }

                    button {
                        class: "btn-primary",
                        r#type: "submit",
                        disabled: state.submitting,
                        "{submit_label}"
                    }
                }

                p {
                    class: "toggle-text",
                    "{prompt} "
                    button {
                        class: "btn-link",
                        r#type: "button",
                        onclick: move |_| view.write().toggle(),
                        "{link}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::AuthErrorKind;

    #[test]
    fn test_failure_shows_provider_message() {
        let mut state = FormState {
            email: " a@b.com ".into(),
            password: "wrongpass".into(),
            ..FormState::default()
        };

        let (email, password) = state.begin_submit();
        assert_eq!(email, "a@b.com");
        assert_eq!(password, "wrongpass");
        assert!(state.submitting);

        state.fail(&AuthError::new(
            AuthErrorKind::InvalidCredentials,
            "Invalid email or password",
        ));
        assert!(!state.submitting);
        assert_eq!(state.error.as_deref(), Some("Invalid email or password"));
    }

    #[test]
    fn test_resubmit_clears_previous_error() {
        let mut state = FormState {
            error: Some("Invalid email or password".into()),
            ..FormState::default()
        };
        state.begin_submit();
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_success_forgets_password() {
        let mut state = FormState {
            email: "a@b.com".into(),
            password: "hunter22".into(),
            ..FormState::default()
        };
        state.begin_submit();
        state.succeed();
        assert!(state.password.is_empty());
        assert_eq!(state.email, "a@b.com");
    }

    fn invalid_credentials() -> AuthError {
        AuthError::new(AuthErrorKind::InvalidCredentials, "Invalid email or password")
    }

    #[test]
    fn test_toggle_round_trip_clears_error() {
        let mut view = CredentialsView::default();
        view.form.email = "a@b.com".into();
        let (epoch, _, _) = view.begin_submit();
        view.settle::<()>(epoch, &Err(invalid_credentials()));
        assert!(view.form.error.is_some());

        view.toggle();
        assert_eq!(view.mode, FormMode::Register);
        assert_eq!(view.form, FormState::default());

        view.toggle();
        assert_eq!(view.mode, FormMode::Login);
        assert_eq!(view.form, FormState::default());
    }

    #[test]
    fn test_result_after_toggle_is_dropped() {
        let mut view = CredentialsView::default();
        let (epoch, _, _) = view.begin_submit();

        view.toggle();
        view.toggle();

        assert!(!view.settle::<()>(epoch, &Err(invalid_credentials())));
        assert_eq!(view.form.error, None);
        assert!(!view.form.submitting);
    }

    #[test]
    fn test_current_result_is_applied() {
        let mut view = CredentialsView::default();
        let (epoch, _, _) = view.begin_submit();

        assert!(view.settle::<()>(epoch, &Err(invalid_credentials())));
        assert_eq!(view.form.error.as_deref(), Some("Invalid email or password"));
    }
}
