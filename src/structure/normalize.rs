//! Header level normalization.

use std::collections::{BTreeSet, HashMap};

use crate::model::{Document, Element, MAX_HEADER_LEVEL};

/// Rewrites header levels from the ranking of header font sizes.
///
/// The largest distinct size becomes level 1, the next level 2, and so on;
/// every size ranked beyond [`MAX_HEADER_LEVEL`] collapses onto it. Only the
/// set of sizes present matters, not their position, so running it twice
/// changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderLevelNormalizer;

impl HeaderLevelNormalizer {
    /// Create a normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Map each distinct header size to its level.
    pub fn levels(&self, document: &Document) -> HashMap<u32, u8> {
        let sizes: BTreeSet<u32> = document.headers().map(|(size, _)| size).collect();

        sizes
            .into_iter()
            .rev()
            .enumerate()
            .map(|(rank, size)| {
                let level = u8::try_from(rank + 1)
                    .unwrap_or(MAX_HEADER_LEVEL)
                    .min(MAX_HEADER_LEVEL);
                (size, level)
            })
            .collect()
    }

    /// Rewrite every header's level in place.
    pub fn normalize(&self, document: &mut Document) {
        let levels = self.levels(document);
        if levels.is_empty() {
            return;
        }
        log::debug!("ranked {} distinct header sizes", levels.len());

        for element in &mut document.elements {
            if let Element::Header {
                font_size, level, ..
            } = element
            {
                if let Some(&ranked) = levels.get(&*font_size) {
                    *level = ranked;
                }
                debug_assert!((1..=MAX_HEADER_LEVEL).contains(&*level));
            }
        }
    }
}
