//! Librarium Library Management Core
//!
//! A local-first library management core: books, physical copies, members,
//! and loan transactions, with a policy engine enforcing loan duration,
//! per-member loan caps, and renewal limits. State persists as a versioned
//! JSON snapshot on disk.

pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod logging;
pub mod models;
pub mod repository;
pub mod rules;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind};
pub use rules::Policy;
