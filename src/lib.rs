//! Groq Proxy - pass-through gateway for Groq chat completions.
//!
//! Features:
//! - OpenAI-compatible `/v1/chat/completions` forwarding
//! - Server-held API key injected into every upstream call
//! - Byte-for-byte relay of streamed responses
//! - Permissive CORS for browser callers

pub mod api;
pub mod config;
pub mod error;
pub mod http;
