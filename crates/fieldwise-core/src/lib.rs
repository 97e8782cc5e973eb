//! # fieldwise-core
//!
//! Typed field extraction over JSON value trees.
//!
//! A [`Decoder`] wraps one `serde_json::Value` and pulls named fields out of
//! it, coerced to statically-known target types and optionally validated.
//! Target types fall into three families: directly convertible scalars
//! ([`Scalar`]), self-describing values that construct themselves from a
//! subtree ([`FromValue`]), and enumerations resolved through a raw tag
//! value ([`RawBacked`]).
//!
//! ## Quick start
//!
//! ```rust
//! use fieldwise_core::{Decoder, FromValue, FromValueError};
//! use serde_json::{json, Value};
//!
//! struct Track {
//!     title: String,
//!     plays: u64,
//! }
//!
//! impl FromValue for Track {
//!     fn from_value(value: &Value) -> Result<Self, FromValueError> {
//!         let dec = Decoder::new(value);
//!         Ok(Track {
//!             title: dec.scalar("title", &[])?,
//!             plays: dec.opt_scalar("plays").unwrap_or(0),
//!         })
//!     }
//! }
//!
//! let data = json!({
//!     "artist": "Lera Lynn",
//!     "tracks": [
//!         {"title": "Whiskey", "plays": 42},
//!         {"title": "Lately"},
//!     ],
//! });
//!
//! let dec = Decoder::new(&data);
//! let artist: String = dec.scalar("artist", &[]).unwrap();
//! let tracks: Vec<Track> = dec.nested_seq("tracks", &[]).unwrap();
//! assert_eq!(artist, "Lera Lynn");
//! assert_eq!(tracks.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] -- the `Decoder` and its extraction-operation matrix
//! - [`convert`] -- conversion capability traits and the built-in scalar set
//! - [`validate`] -- the validation boundary consumed by required extractions
//! - [`error`] -- error taxonomy for failed extractions

pub mod convert;
pub mod decoder;
pub mod error;
pub mod validate;

pub use convert::{kind, FromValue, FromValueError, Mismatch, RawBacked, Scalar};
pub use decoder::Decoder;
pub use error::{DecodeError, Strategy, UnwrapOfAbsent};
pub use validate::{validate_all, ValidationError, Validator};
