//! callops - operator console for an AI voice-calling platform
//!
//! The binary is a thin dispatcher over this library. Command logic lives in
//! [`cli`], backend access in [`client`], and session handling in
//! [`session`].

pub mod call;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod output;
pub mod session;
pub mod validate;
