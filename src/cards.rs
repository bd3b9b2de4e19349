//! Word cards shown above the cloud

use crate::constants::MAX_CARDS;
use crate::types::WordFrequency;
use crate::utils::format_frequency;

#[derive(Debug, Clone, PartialEq)]
pub struct WordCard {
    pub word: String,
    pub label: String,
}

/// One card per word for the first [`MAX_CARDS`] entries, in input order.
/// The list is assumed to be ranked already.
pub fn build_cards(words: &[WordFrequency]) -> Vec<WordCard> {
    words
        .iter()
        .take(MAX_CARDS)
        .map(|w| WordCard {
            word: w.word.clone(),
            label: format!("Frequency: {}", format_frequency(w.frequency)),
        })
        .collect()
}
