//! `RpgAssistant` - A Discord bot for tabletop campaign bookkeeping
//!
//! This crate automates campaign management inside a Discord guild: one
//! command builds a campaign's category, channel set, and Player/Dungeon
//! Master roles; others add and remove players with their private log
//! channels, rename or tear the whole thing down again, and handle small
//! role utilities. A local registry maps each campaign to the platform
//! objects it owns, and partially-failed operations compensate the steps
//! that already ran.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Performance
    clippy::inefficient_to_string,
    clippy::needless_pass_by_value,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

// Note: `missing_docs` is set to `warn` instead of `deny` because
// macro-generated code (e.g., `poise::command`) doesn't include docs.

/// Discord bot interface - commands and bot context
pub mod bot;
/// Configuration management for the registry and the channel template
pub mod config;
/// Core business logic - campaign lifecycle, membership, and role operations
pub mod core;
/// SeaORM entity definitions for the campaign registry
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Chat-platform access layer and its live Discord implementation
pub mod platform;

#[cfg(test)]
pub mod test_utils;
