//! Session state and durable storage for the foodweb client
//!
//! This crate provides:
//! - Session types: the signed-in user summary and bearer token
//! - A key/value storage abstraction standing in for browser local storage
//! - File-backed and in-memory storage implementations

pub mod session;
pub mod storage;

pub use session::{Role, Session, UserInfo};
pub use storage::{
    LocalFileStorage, LocalStorage, MemoryStorage, StorageError, StorageResult, TOKEN_KEY,
    USER_INFO_KEY,
};
