//! ashram-admin - Headless admin client for ashram guesthouse management
//!
//! Owns everything below the rendering layer of the admin dashboard:
//! the HTTP client with bearer-token auth, per-resource list/filter
//! synchronizers, mutation dispatch with reload-on-success, and the
//! create/edit form drafts. A UI shell (the bundled CLI, or anything
//! else) drives the pages and drains their notification queues.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod notify;
pub mod pages;
pub mod reports;
pub mod session;
pub mod sync;
