//! Data models shared by the client and the server.

mod session;
mod user;

pub use session::Session;
pub use user::UserInfo;
