//! Carts

pub mod errors;
pub mod session;
pub mod storage;

pub use errors::CartsStorageError;
pub use session::CartSession;
pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage};
