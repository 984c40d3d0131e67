//! API Client
//!
//! Browser implementation of the vote service seam.

pub mod client;

pub use client::GlooApi;
