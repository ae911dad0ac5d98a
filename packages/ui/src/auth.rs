//! Authentication context and hooks for the UI.

use api::{AuthStore, Session, UserInfo};
use dioxus::prelude::*;

/// What components see of authentication: the latest session, read-only, and the
/// store whose operations change it.
#[derive(Clone)]
pub struct AuthContext {
    session: Signal<Session>,
    store: AuthStore,
}

impl AuthContext {
    /// The current session. Reading it subscribes the calling component.
    pub fn session(&self) -> Session {
        (self.session)()
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.session.read().current_user().cloned()
    }

    /// Handle for login, register, logout and token retrieval.
    pub fn store(&self) -> AuthStore {
        self.store.clone()
    }
}

/// Get the authentication context provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Provider component that mirrors the store's session into the component tree.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(store: AuthStore, children: Element) -> Element {
    let initial = store.session();
    let mut session = use_signal(move || initial);

    // Subscribe once; the task, and with it the subscription, ends when the provider
    // unmounts.
    let subscription = store.clone();
    use_future(move || {
        let mut updates = subscription.subscribe();
        async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                tracing::debug!(authenticated = next.is_authenticated(), "session changed");
                session.set(next);
            }
        }
    });

    use_context_provider(|| AuthContext { session, store });

    rsx! {
        {children}
    }
}
