//! HTTP implementation of the text source.

mod client;

pub use client::{decode_text, HttpTextSource, DEFAULT_TEXT_TIMEOUT};
