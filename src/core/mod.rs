// src/core/mod.rs

pub mod config;
pub mod config_loader;
pub mod error;
pub mod extract;
pub mod record;
pub mod service;
pub mod source;
pub mod store;
