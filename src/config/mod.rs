//! Configuration module for SessionBook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SessionBookPaths;
pub use settings::{ClassifierRules, Settings};
