//! Modules layer - Infrastructure components shared by features
//!
//! Contains the persistence layer every feature stores its records through.

pub mod store;
