//! Authentication: the identity provider seam and the store that owns the session.

mod error;
mod firebase;
mod local;
mod password;
mod provider;
mod store;
#[cfg(test)]
pub(crate) mod testing;

pub use error::{AuthError, AuthErrorKind};
pub use firebase::FirebaseAuth;
pub use local::LocalAuth;
pub use provider::IdentityProvider;
pub use store::AuthStore;
