//! Shared foundational helpers used across the braid asset pipeline.
//!
//! This crate provides the small primitives every other crate leans on:
//! theme-name slug normalization and Unix-time helpers for comparing
//! filesystem and remote modification times.

#![warn(missing_docs)]

pub mod slug;
pub mod time;

pub use slug::theme_slug;
pub use time::{mtime_secs, unix_now};
