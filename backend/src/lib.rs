//! # Student Server
//!
//! A small REST service managing student records behind HTTP Basic
//! authentication.
//!
//! ## Architecture
//!
//! - [`models`]: the [`models::Student`] record and its JSON shape
//! - [`db`]: the [`db::StudentRepository`] trait with in-memory and Postgres
//!   implementations, plus the factory that picks one at startup
//! - [`http`]: axum router, Basic auth gate and CRUD handlers
//! - [`config`]: TOML configuration file and port/backend resolution
//!
//! ## Storage backends
//!
//! The in-memory backend (`local-repo`, default) keeps records in insertion
//! order and loses them on restart. The Postgres backend (`postgres-repo`)
//! stores them in a `students` table and runs its migrations on startup.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod config;
#[cfg(feature = "http-server")]
pub mod http;
