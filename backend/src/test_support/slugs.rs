//! Deterministic slug generation.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::{PasteSlug, RandomSlugGenerator, SlugGenerator};

/// Yields a scripted sequence of slugs, then falls back to random ones.
#[derive(Debug)]
pub struct ScriptedSlugGenerator {
    script: Mutex<VecDeque<PasteSlug>>,
    fallback: RandomSlugGenerator,
}

impl ScriptedSlugGenerator {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let script = slugs
            .into_iter()
            .map(|raw| match PasteSlug::new(raw.as_ref()) {
                Ok(slug) => slug,
                Err(error) => panic!("scripted slug {:?} is invalid: {error}", raw.as_ref()),
            })
            .collect();
        Self {
            script: Mutex::new(script),
            fallback: RandomSlugGenerator::default(),
        }
    }

    /// Slugs not yet handed out.
    pub fn remaining(&self) -> usize {
        match self.script.lock() {
            Ok(script) => script.len(),
            Err(_) => panic!("slug script mutex"),
        }
    }
}

impl SlugGenerator for ScriptedSlugGenerator {
    fn generate(&self) -> PasteSlug {
        let next = match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(_) => panic!("slug script mutex"),
        };
        next.unwrap_or_else(|| self.fallback.generate())
    }
}
