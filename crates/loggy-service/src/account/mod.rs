//! Account creation, login, and identity.

pub mod service;

pub use service::AccountService;
