//! Content filtering and assembly for compiled bundles.
//!
//! This crate turns resolved source content into one artifact body: each
//! piece passes through an extension-specific filter chain, then the pieces
//! are joined with origin banners.

#![warn(missing_docs)]

pub mod filter;
pub mod piece;

pub use filter::{CssSqueeze, Filter, FilterChain};
pub use piece::{join_pieces, SourcePiece};
