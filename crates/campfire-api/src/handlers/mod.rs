//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod announcements;
pub mod auth;
pub mod comments;
pub mod health;
pub mod judging;
pub mod posts;
pub mod reports;
pub mod settings;
pub mod teams;
pub mod users;
