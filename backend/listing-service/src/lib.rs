//! Listing Service Library
//!
//! REST backend for the Marketboard classifieds platform. Users post
//! listings into fixed categories (jobs, pets, fashions, services, bikes,
//! phones) and like, comment on, and delete them. All categories share one
//! generic engine instead of per-category handler copies.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers
//! - `models`: data structures for listings, likes, comments and categories
//! - `services`: business logic layer (listing engine, engagement, ownership)
//! - `db`: database access layer and repositories
//! - `middleware`: HTTP middleware for authentication
//! - `auth`: JWT validation helpers
//! - `error`: error types and handling
//! - `config`: configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
