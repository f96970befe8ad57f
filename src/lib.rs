//! Per-day meal plan service
//!
//! Stores a lunch and a dinner for each calendar date in either a local
//! SQLite file or a PostgreSQL database, behind a small JSON HTTP API, and
//! ships a terminal client that can work against the API or in memory.

pub mod client;
pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;
pub mod web;
