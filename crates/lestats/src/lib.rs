// lestats - Statistics Service Client
//
// *Les Stats* (The Stats) - Outbound client for the matrix statistics collaborator

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod client;

pub use client::{StatsClient, StatsError, StatsSummary, DEFAULT_TIMEOUT_SECS};
