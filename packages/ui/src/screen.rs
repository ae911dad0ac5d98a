//! Which top-level view to show.

use std::fmt;

use api::Session;

/// Local toggle between the two credential forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Login,
    Register,
}

impl FormMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Register => "Create Account",
        }
    }

    pub fn submit_label(self, submitting: bool) -> &'static str {
        match (self, submitting) {
            (Self::Login, false) => "Log In",
            (Self::Login, true) => "Logging in...",
            (Self::Register, false) => "Sign Up",
            (Self::Register, true) => "Creating account...",
        }
    }

    /// Prompt and link text pointing at the other form.
    pub fn toggle_prompt(self) -> (&'static str, &'static str) {
        match self {
            Self::Login => ("Don't have an account?", "Sign up"),
            Self::Register => ("Already have an account?", "Sign in"),
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("login"),
            Self::Register => f.write_str("register"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
}

/// The dashboard whenever someone is signed in, otherwise the form `mode` selects.
pub fn screen_for(session: &Session, mode: FormMode) -> Screen {
    if session.is_authenticated() {
        return Screen::Dashboard;
    }
    match mode {
        FormMode::Login => Screen::Login,
        FormMode::Register => Screen::Register,
    }
}
