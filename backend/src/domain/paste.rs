//! Paste entity and the validated values it is built from.

use std::fmt;
use std::num::{NonZeroU32, NonZeroU64};

use chrono::{DateTime, TimeDelta, Utc};

/// Longest slug the storage layer accepts.
pub const SLUG_MAX_LEN: usize = 16;

/// Upper bound on `max_views`, matching the signed 32-bit storage column.
pub const MAX_VIEW_LIMIT: u32 = i32::MAX as u32;

/// Validation failures for paste input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteValidationError {
    EmptyContent,
    TtlNotPositive,
    TtlOutOfRange,
    MaxViewsNotPositive,
    MaxViewsTooLarge,
    EmptySlug,
    SlugTooLong { max: usize },
    InvalidSlugCharacter,
}

impl PasteValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyContent => "content",
            Self::TtlNotPositive | Self::TtlOutOfRange => "ttl_seconds",
            Self::MaxViewsNotPositive | Self::MaxViewsTooLarge => "max_views",
            Self::EmptySlug | Self::SlugTooLong { .. } | Self::InvalidSlugCharacter => "id",
        }
    }

    /// Machine readable failure code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyContent | Self::EmptySlug => "required",
            Self::TtlNotPositive | Self::MaxViewsNotPositive => "below_minimum",
            Self::TtlOutOfRange | Self::MaxViewsTooLarge | Self::SlugTooLong { .. } => {
                "above_maximum"
            }
            Self::InvalidSlugCharacter => "invalid_character",
        }
    }
}

impl fmt::Display for PasteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content is required"),
            Self::TtlNotPositive => write!(f, "ttl_seconds must be >= 1"),
            Self::TtlOutOfRange => write!(f, "ttl_seconds is too large"),
            Self::MaxViewsNotPositive => write!(f, "max_views must be >= 1"),
            Self::MaxViewsTooLarge => write!(f, "max_views must be <= {MAX_VIEW_LIMIT}"),
            Self::EmptySlug => write!(f, "paste id must not be empty"),
            Self::SlugTooLong { max } => write!(f, "paste id must be at most {max} characters"),
            Self::InvalidSlugCharacter => {
                write!(f, "paste id may only contain lowercase letters and digits")
            }
        }
    }
}

impl std::error::Error for PasteValidationError {}

/// Public identifier of a paste: lowercase ASCII letters and digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PasteSlug(String);

impl PasteSlug {
    /// Validate and wrap a slug.
    pub fn new(value: impl Into<String>) -> Result<Self, PasteValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(PasteValidationError::EmptySlug);
        }
        if value.len() > SLUG_MAX_LEN {
            return Err(PasteValidationError::SlugTooLong { max: SLUG_MAX_LEN });
        }
        if !value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(PasteValidationError::InvalidSlugCharacter);
        }
        Ok(Self(value))
    }

    /// Wrap a slug built from the generator alphabet.
    pub(crate) fn from_generated(value: String) -> Self {
        debug_assert!(Self::new(value.clone()).is_ok());
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PasteSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasteSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PasteSlug> for String {
    fn from(value: PasteSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for PasteSlug {
    type Error = PasteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Paste body. Stored verbatim; only whitespace-only input is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteContent(String);

impl PasteContent {
    pub fn new(value: impl Into<String>) -> Result<Self, PasteValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PasteValidationError::EmptyContent);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Lifetime of a paste in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl(NonZeroU64);

impl Ttl {
    pub fn from_seconds(seconds: i64) -> Result<Self, PasteValidationError> {
        u64::try_from(seconds)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(PasteValidationError::TtlNotPositive)
    }

    pub const fn seconds(self) -> u64 {
        self.0.get()
    }

    /// Instant at which a paste created at `created_at` stops being served.
    pub fn expiry_from(self, created_at: DateTime<Utc>) -> Result<DateTime<Utc>, PasteValidationError> {
        i64::try_from(self.seconds())
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| created_at.checked_add_signed(delta))
            .ok_or(PasteValidationError::TtlOutOfRange)
    }
}

/// Number of successful reads a paste allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLimit(NonZeroU32);

impl ViewLimit {
    pub fn from_count(count: i64) -> Result<Self, PasteValidationError> {
        if count < 1 {
            return Err(PasteValidationError::MaxViewsNotPositive);
        }
        u32::try_from(count)
            .ok()
            .filter(|value| *value <= MAX_VIEW_LIMIT)
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(PasteValidationError::MaxViewsTooLarge)
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// A stored paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paste {
    pub slug: PasteSlug,
    pub content: String,
    /// Absent when the paste never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Absent when reads are unlimited.
    pub max_views: Option<ViewLimit>,
    /// Successful reads served so far.
    pub view_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Paste {
    /// Reads left before the limit, `None` when unlimited.
    pub fn remaining_views(&self) -> Option<u32> {
        self.max_views
            .map(|limit| limit.get().saturating_sub(self.view_count))
    }
}

/// A validated paste awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaste {
    pub slug: PasteSlug,
    pub content: PasteContent,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<ViewLimit>,
    pub created_at: DateTime<Utc>,
}

impl NewPaste {
    /// The paste as it reads straight after insertion.
    pub fn into_paste(self) -> Paste {
        Paste {
            slug: self.slug,
            content: self.content.into_inner(),
            expires_at: self.expires_at,
            max_views: self.max_views,
            view_count: 0,
            created_at: self.created_at,
        }
    }
}
