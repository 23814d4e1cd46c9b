//! AnnoRepo implementation of the annotation store.
//!
//! Talks to the search endpoints of one AnnoRepo container over HTTP.

mod client;

pub use client::AnnoRepoClient;
