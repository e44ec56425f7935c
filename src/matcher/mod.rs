//! Keyword-to-verse matching.
//!
//! A verse matches when its lower-cased text contains any keyword as a
//! substring. This is plain containment, not word matching: "rage" also
//! matches "courage". Selection among candidates is uniform over the
//! supplied random source.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::corpus::{Corpus, VerseRecord};

/// All verses whose text contains at least one keyword, in corpus order.
pub fn matching_verses<'a>(keywords: &[String], corpus: &'a Corpus) -> Vec<&'a VerseRecord> {
    let keywords: Vec<String> = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| k.to_lowercase())
        .collect();

    if keywords.is_empty() {
        return Vec::new();
    }

    corpus
        .iter()
        .filter(|verse| {
            let text = verse.text.to_lowercase();
            keywords.iter().any(|k| text.contains(k.as_str()))
        })
        .collect()
}

/// Pick a verse for `keywords`.
///
/// Returns `None` only when the corpus is empty. Otherwise a random matching
/// verse is returned, or a random verse from the whole corpus when there are
/// no keywords or nothing matches.
pub fn select<'a, R: Rng + ?Sized>(
    keywords: &[String],
    corpus: &'a Corpus,
    rng: &mut R,
) -> Option<&'a VerseRecord> {
    if corpus.is_empty() {
        return None;
    }

    let candidates = matching_verses(keywords, corpus);
    if let Some(verse) = candidates.choose(rng) {
        return Some(*verse);
    }

    log::debug!("Falling back to random verse.");
    corpus.verses().choose(rng)
}
