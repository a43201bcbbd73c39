//! Session and account identity for the Food Bridge client.
//! Keep the public surface thin and split implementation across sub-modules.

mod persist;
mod session;
mod user;

pub use persist::{FileTokenStore, MemoryTokenStore, TokenStore, ACCOUNT_TYPE_KEY, TOKEN_KEY};
pub use session::SessionStore;
pub use user::{AccountType, User};
