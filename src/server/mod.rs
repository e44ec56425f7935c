//! HTTP server exposing the verse agent over A2A.
//!
//! # Endpoints
//!
//! - `POST /`                       — JSON-RPC `message/send`
//! - `GET  /.well-known/agent.json` — Agent card
//! - `GET  /health`                 — Liveness probe

pub mod routes;

pub use routes::{app_router, AppState};
