//! Core engine configuration
//!
//! Configuration types for every engine subsystem live in [`config`].

pub mod config;
