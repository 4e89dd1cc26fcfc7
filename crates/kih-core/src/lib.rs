//! # kih-core
//!
//! Core types for the Kampung Inggris Digital Hub.
//!
//! This crate provides the foundational types shared across all portal crates:
//! - Entity structs for every document collection (courses, kos, forum, locations)
//! - Categorical enums and the collection registry
//! - The signed-in user snapshot handed out by the session hub
//! - Filter/search composition for listing pages
//! - Listing view states and forum flow state machines
//!
//! Nothing in here performs I/O.

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod forum;
pub mod identity;
pub mod listing;
