//! Random slug generation for new pastes.

use rand::Rng;

use super::{PasteSlug, SLUG_MAX_LEN};

/// Characters a generated slug may contain.
pub const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Slug length used when none is configured.
pub const DEFAULT_SLUG_LENGTH: usize = 6;

/// Shortest configurable slug.
pub const MIN_SLUG_LENGTH: usize = 4;

/// Produces candidate slugs. Uniqueness is enforced by storage.
pub trait SlugGenerator: Send + Sync {
    fn generate(&self) -> PasteSlug;
}

/// Rejected slug length configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("slug length must be between {MIN_SLUG_LENGTH} and {SLUG_MAX_LEN}, got {length}")]
pub struct SlugLengthError {
    pub length: usize,
}

/// Draws each character uniformly from [`SLUG_ALPHABET`].
#[derive(Debug, Clone, Copy)]
pub struct RandomSlugGenerator {
    length: usize,
}

impl RandomSlugGenerator {
    pub fn new(length: usize) -> Result<Self, SlugLengthError> {
        if !(MIN_SLUG_LENGTH..=SLUG_MAX_LEN).contains(&length) {
            return Err(SlugLengthError { length });
        }
        Ok(Self { length })
    }

    pub const fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomSlugGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_SLUG_LENGTH,
        }
    }
}

impl SlugGenerator for RandomSlugGenerator {
    fn generate(&self) -> PasteSlug {
        let mut rng = rand::thread_rng();
        let raw: String = (0..self.length)
            .map(|_| char::from(SLUG_ALPHABET[rng.gen_range(0..SLUG_ALPHABET.len())]))
            .collect();
        PasteSlug::from_generated(raw)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(MIN_SLUG_LENGTH)]
    #[case(DEFAULT_SLUG_LENGTH)]
    #[case(SLUG_MAX_LEN)]
    fn generates_slugs_of_configured_length(#[case] length: usize) {
        let generator = RandomSlugGenerator::new(length).expect("valid length");
        for _ in 0..50 {
            let slug = generator.generate();
            assert_eq!(slug.as_str().len(), length);
            assert!(slug.as_str().bytes().all(|b| SLUG_ALPHABET.contains(&b)));
        }
    }

    #[rstest]
    #[case(0)]
    #[case(MIN_SLUG_LENGTH - 1)]
    #[case(SLUG_MAX_LEN + 1)]
    fn rejects_out_of_range_lengths(#[case] length: usize) {
        assert_eq!(RandomSlugGenerator::new(length).err(), Some(SlugLengthError { length }));
    }

    #[test]
    fn default_length_is_six() {
        assert_eq!(RandomSlugGenerator::default().length(), 6);
    }

    #[test]
    fn consecutive_slugs_rarely_repeat() {
        let generator = RandomSlugGenerator::default();
        let seen: HashSet<_> = (0..200).map(|_| generator.generate()).collect();
        assert!(seen.len() > 190);
    }
}
