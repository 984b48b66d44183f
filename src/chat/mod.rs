pub mod cache;
pub mod conversation;
pub mod format;
pub mod intent;
pub mod pending;
pub mod router;
pub mod session;
pub mod transcript;
