//! Library exports for the planet residents service
//!
//! This module exposes internal components for testing and potential library usage.

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod pipeline;
pub mod route;
