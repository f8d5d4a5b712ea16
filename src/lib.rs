//! Blog server library.
//!
//! A server-rendered blog: a single admin author publishes posts, registered
//! readers comment on them, and visitors can reach the author through a
//! contact form delivered by email.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod auth;
pub mod blog;
pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod mail;
pub mod web;
