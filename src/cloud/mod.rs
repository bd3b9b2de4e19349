//! Word cloud model and layout
//!
//! Toolkit-free: the GUI measures text with egui fonts through [`TextMeasure`],
//! then hands the sized words to [`layout`] on a worker thread. Coordinates of
//! [`PlacedWord`] are relative to the canvas center.

mod layout;
mod rng;

pub use layout::layout;

use crate::constants::{
    CLOUD_FONT, CLOUD_HEIGHT, CLOUD_PADDING, CLOUD_SIZE_BASE, CLOUD_SIZE_SCALE,
};
use crate::types::WordFrequency;

#[derive(Debug, Clone, PartialEq)]
pub struct CloudConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub font: String,
    pub seed: u64,
}

impl CloudConfig {
    /// Container width by the fixed cloud height
    pub fn new(width: f32, seed: u64) -> Self {
        Self {
            width,
            height: CLOUD_HEIGHT,
            padding: CLOUD_PADDING,
            font: CLOUD_FONT.to_string(),
            seed,
        }
    }
}

/// Layout input: display text, font size, and the frequency it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CloudWord {
    pub text: String,
    pub size: f32,
    pub value: f64,
}

/// Linear size scale with a fixed intercept
pub fn font_size(frequency: f64) -> f32 {
    CLOUD_SIZE_BASE + frequency as f32 * CLOUD_SIZE_SCALE
}

/// Every word becomes a cloud word; nothing is truncated here.
pub fn cloud_words(words: &[WordFrequency]) -> Vec<CloudWord> {
    words
        .iter()
        .map(|w| CloudWord {
            text: w.word.clone(),
            size: font_size(w.frequency),
            value: w.frequency,
        })
        .collect()
}

/// Text extents (width, height) of `text` at font `size`
pub trait TextMeasure {
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Fixed-advance estimate for tests
#[cfg(test)]
pub struct EstimatedMeasure;

#[cfg(test)]
impl TextMeasure for EstimatedMeasure {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        (text.chars().count() as f32 * size * 0.55, size)
    }
}

/// A cloud word with its unrotated text extents
#[derive(Debug, Clone, PartialEq)]
pub struct SizedWord {
    pub word: CloudWord,
    pub width: f32,
    pub height: f32,
}

pub fn measure_words(words: &[CloudWord], measure: &dyn TextMeasure) -> Vec<SizedWord> {
    words
        .iter()
        .map(|w| {
            let (width, height) = measure.measure(&w.text, w.size);
            SizedWord {
                word: w.clone(),
                width,
                height,
            }
        })
        .collect()
}

/// A word after placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub value: f64,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    /// Degrees, 0 or 90
    pub rotate: f32,
    /// Unrotated text extents
    pub width: f32,
    pub height: f32,
}

impl PlacedWord {
    /// Half extents of the on-screen box, rotation applied
    pub fn half_extents(&self) -> (f32, f32) {
        if self.rotate == 0.0 {
            (self.width / 2.0, self.height / 2.0)
        } else {
            (self.height / 2.0, self.width / 2.0)
        }
    }

    /// Whether a point relative to the canvas center falls on this word
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (hw, hh) = self.half_extents();
        (x - self.x).abs() <= hw && (y - self.y).abs() <= hh
    }

    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.text, crate::utils::format_frequency(self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn size_follows_linear_scale() {
        assert_eq!(font_size(0.0), 10.0);
        assert_eq!(font_size(5.0), 12.5);
        assert_eq!(font_size(100.0), 60.0);
    }

    #[test]
    fn cloud_words_keep_every_entry() {
        let words: Vec<WordFrequency> = (0..25)
            .map(|i| WordFrequency::new(format!("w{}", i), i as f64))
            .collect();
        let cloud = cloud_words(&words);
        assert_eq!(cloud.len(), 25);
        assert_eq!(
            cloud[4],
            CloudWord {
                text: "w4".into(),
                size: 12.0,
                value: 4.0
            }
        );
    }

    #[test]
    fn config_uses_fixed_height_and_padding() {
        let config = CloudConfig::new(720.0, 9);
        assert_eq!(config.width, 720.0);
        assert_eq!(config.height, CLOUD_HEIGHT);
        assert_eq!(config.padding, CLOUD_PADDING);
        assert_eq!(config.font, CLOUD_FONT);
    }

    #[test]
    fn rotated_word_swaps_extents() {
        let mut word = PlacedWord {
            text: "tall".into(),
            value: 3.0,
            size: 11.5,
            x: 10.0,
            y: -5.0,
            rotate: 0.0,
            width: 40.0,
            height: 12.0,
        };
        assert_eq!(word.half_extents(), (20.0, 6.0));
        assert!(word.contains(28.0, -5.0));
        word.rotate = 90.0;
        assert_eq!(word.half_extents(), (6.0, 20.0));
        assert!(!word.contains(28.0, -5.0));
        assert!(word.contains(10.0, 13.0));
        assert_eq!(word.tooltip(), "tall: 3");
    }
}
