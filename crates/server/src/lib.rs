#![allow(clippy::should_implement_trait)]
pub mod config;
pub mod error;
pub mod extract;
pub mod player;
pub mod routes;
pub mod state;
