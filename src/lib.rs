//! Serves the agents chat UI and proxies its API calls to the agents service.
//!
//! ```text
//! browser ──► /            index document
//!         ──► /<asset>     static files
//!         ──► /api/chat    ──► POST {agents_url}/chat
//!         ──► /api/agents  ──► GET  {agents_url}/agents
//!         ──► /api/health  ──► GET  {agents_url}/health
//! ```

pub mod agents_service;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
