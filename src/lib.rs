//! User registration backend.
//!
//! Two front ends over one user store:
//! - HTTP: `GET /` lists users, `POST /user` registers one
//! - WebSocket: every text message is a registration request

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod registration;

pub use config::AppConfig;
