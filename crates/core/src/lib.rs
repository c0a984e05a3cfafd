//! Inventory Panel Core - Shared types library.
//!
//! This crate provides the types used across all Inventory Panel components:
//! - `client` - HTTP resource clients, session handling and view state
//! - `cli` - Command-line front end for the inventory API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. Everything here can be tested without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails and roles
//! - [`models`] - Records mirrored from the inventory API and request payloads
//! - [`filter`] - Client-side product and movement list filters
//! - [`charts`] - Dashboard chart series derived from aggregate payloads
//! - [`validation`] - Form drafts and field-level validation
//! - [`routes`] - Navigation targets and their access requirements

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod charts;
pub mod filter;
pub mod models;
pub mod routes;
pub mod types;
pub mod validation;

pub use types::*;
