#![forbid(unsafe_code)]

//! Bounded, cursor-addressed history storage.
//!
//! The buffer knows nothing about focus or validity; it only stores entries
//! oldest-first and moves a cursor over them. See [`BoundedHistory`].

pub mod buffer;

pub use buffer::{BoundedHistory, DEFAULT_CAPACITY};
