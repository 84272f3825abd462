//! Domain model for paste sharing.
//!
//! Public surface:
//! - [`Paste`], [`NewPaste`] and the validated values they are built from.
//! - [`access_gate::evaluate`], the single authority on servability.
//! - [`PasteService`], implementing the driving ports in [`ports`].
//! - [`PasteSweeper`], optional background purge.
//! - [`Error`] and [`ErrorCode`], the transport-agnostic failure type.

pub mod access_gate;
pub mod error;
pub mod paste;
pub mod paste_service;
pub mod ports;
pub mod slug_generator;
pub mod sweeper;
pub mod trace_id;

pub use self::access_gate::{AccessDecision, AccessDenial};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::paste::{
    MAX_VIEW_LIMIT, NewPaste, Paste, PasteContent, PasteSlug, PasteValidationError, SLUG_MAX_LEN,
    Ttl, ViewLimit,
};
pub use self::paste_service::{PasteService, SLUG_INSERT_ATTEMPTS};
pub use self::slug_generator::{
    DEFAULT_SLUG_LENGTH, MIN_SLUG_LENGTH, RandomSlugGenerator, SLUG_ALPHABET, SlugGenerator,
    SlugLengthError,
};
pub use self::sweeper::PasteSweeper;
pub use self::trace_id::TraceId;

/// Result alias used by driving adapters.
pub type ApiResult<T> = Result<T, Error>;
