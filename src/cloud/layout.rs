//! Spiral placement.
//!
//! Largest words go first. Each word picks a rotation from {0°, 90°}, starts at
//! a random point in the middle half of the canvas and walks an Archimedean
//! spiral (stretched to the canvas aspect ratio) until its padded box hits no
//! placed box and the text lies fully on the canvas. Words that never fit are
//! left out.

use super::rng::SeededRng;
use super::{CloudConfig, PlacedWord, SizedWord};
use tracing::{debug, trace};

pub fn layout(words: &[SizedWord], config: &CloudConfig) -> Vec<PlacedWord> {
    let mut rng = SeededRng::new(config.seed);
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());

    if config.width <= 0.0 || config.height <= 0.0 {
        return placed;
    }

    // Stable, so equal sizes keep their ranking
    let mut order: Vec<usize> = (0..words.len()).collect();
    order.sort_by(|&a, &b| words[b].word.size.total_cmp(&words[a].word.size));

    for idx in order {
        let sized = &words[idx];
        let rotate = if rng.chance(0.5) { 90.0 } else { 0.0 };
        let (hw, hh) = if rotate == 0.0 {
            (sized.width / 2.0, sized.height / 2.0)
        } else {
            (sized.height / 2.0, sized.width / 2.0)
        };

        if hw * 2.0 > config.width || hh * 2.0 > config.height {
            trace!(word = %sized.word.text, "Word larger than canvas");
            continue;
        }

        let start = (
            config.width * (rng.next_f32() - 0.5) / 2.0,
            config.height * (rng.next_f32() - 0.5) / 2.0,
        );
        let dt = if rng.chance(0.5) { 1.0 } else { -1.0 };

        match find_position(start, dt, (hw, hh), config, &placed) {
            Some((x, y)) => placed.push(PlacedWord {
                text: sized.word.text.clone(),
                value: sized.word.value,
                size: sized.word.size,
                x,
                y,
                rotate,
                width: sized.width,
                height: sized.height,
            }),
            None => trace!(word = %sized.word.text, "No room for word"),
        }
    }

    if placed.len() < words.len() {
        debug!(
            placed = placed.len(),
            dropped = words.len() - placed.len(),
            "Some words did not fit the cloud"
        );
    }
    placed
}

fn find_position(
    start: (f32, f32),
    dt: f32,
    half: (f32, f32),
    config: &CloudConfig,
    placed: &[PlacedWord],
) -> Option<(f32, f32)> {
    let ratio = config.width / config.height;
    let max_delta = config.width.hypot(config.height);
    let mut t: f32 = 0.0;

    loop {
        let r = t * 0.1;
        let dx = ratio * r * r.cos();
        let dy = r * r.sin();
        // Past this radius the spiral never touches the canvas again
        if r.abs() * ratio.min(1.0) > max_delta {
            return None;
        }

        let x = start.0 + dx;
        let y = start.1 + dy;
        if on_canvas(x, y, half, config) && !collides(x, y, half, config.padding, placed) {
            return Some((x, y));
        }
        t += dt;
    }
}

fn on_canvas(x: f32, y: f32, (hw, hh): (f32, f32), config: &CloudConfig) -> bool {
    let (cw, ch) = (config.width / 2.0, config.height / 2.0);
    x - hw >= -cw && x + hw <= cw && y - hh >= -ch && y + hh <= ch
}

fn collides(x: f32, y: f32, (hw, hh): (f32, f32), padding: f32, placed: &[PlacedWord]) -> bool {
    placed.iter().any(|p| {
        let (pw, ph) = p.half_extents();
        (x - p.x).abs() < hw + pw + 2.0 * padding && (y - p.y).abs() < hh + ph + 2.0 * padding
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{cloud_words, measure_words, EstimatedMeasure};
    use crate::types::WordFrequency;

    fn sized(words: &[(&str, f64)]) -> Vec<SizedWord> {
        let freqs: Vec<WordFrequency> = words
            .iter()
            .map(|(w, f)| WordFrequency::new(*w, *f))
            .collect();
        measure_words(&cloud_words(&freqs), &EstimatedMeasure)
    }

    fn ranked(n: usize) -> Vec<SizedWord> {
        let freqs: Vec<WordFrequency> = (0..n)
            .map(|i| WordFrequency::new(format!("word{}", i), (n - i) as f64))
            .collect();
        measure_words(&cloud_words(&freqs), &EstimatedMeasure)
    }

    fn assert_valid(placed: &[PlacedWord], config: &CloudConfig) {
        for (i, a) in placed.iter().enumerate() {
            let (hw, hh) = a.half_extents();
            assert!(a.x - hw >= -config.width / 2.0 - 1e-3, "{} off left edge", a.text);
            assert!(a.x + hw <= config.width / 2.0 + 1e-3, "{} off right edge", a.text);
            assert!(a.y - hh >= -config.height / 2.0 - 1e-3, "{} off top edge", a.text);
            assert!(a.y + hh <= config.height / 2.0 + 1e-3, "{} off bottom edge", a.text);
            assert!(a.rotate == 0.0 || a.rotate == 90.0);

            for b in &placed[i + 1..] {
                let (bw, bh) = b.half_extents();
                let overlap_x = (a.x - b.x).abs() < hw + bw + 2.0 * config.padding;
                let overlap_y = (a.y - b.y).abs() < hh + bh + 2.0 * config.padding;
                assert!(!(overlap_x && overlap_y), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn two_words_both_fit() {
        let config = CloudConfig::new(800.0, 11);
        let placed = layout(&sized(&[("dog", 5.0), ("cat", 3.0)]), &config);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].text, "dog");
        assert_eq!(placed[0].size, 12.5);
        assert_eq!(placed[1].size, 11.5);
        assert_valid(&placed, &config);
    }

    #[test]
    fn placed_words_never_overlap_or_leave_canvas() {
        for seed in [0, 1, 2, 99, 12345] {
            let config = CloudConfig::new(640.0, seed);
            let placed = layout(&ranked(60), &config);
            assert!(!placed.is_empty());
            assert_valid(&placed, &config);
        }
    }

    #[test]
    fn larger_words_are_placed_first() {
        let config = CloudConfig::new(900.0, 5);
        let placed = layout(&sized(&[("small", 1.0), ("huge", 60.0), ("mid", 20.0)]), &config);
        let order: Vec<&str> = placed.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(order, vec!["huge", "mid", "small"]);
    }

    #[test]
    fn same_seed_reproduces_layout() {
        let words = ranked(30);
        let config = CloudConfig::new(700.0, 77);
        assert_eq!(layout(&words, &config), layout(&words, &config));
    }

    #[test]
    fn both_rotations_are_used() {
        let config = CloudConfig::new(1200.0, 3);
        let placed = layout(&ranked(40), &config);
        assert!(placed.iter().any(|p| p.rotate == 0.0));
        assert!(placed.iter().any(|p| p.rotate == 90.0));
    }

    #[test]
    fn oversized_words_are_dropped() {
        let config = CloudConfig::new(60.0, 1);
        // 1000 frequency -> size 510, wider and taller than the canvas
        let placed = layout(&sized(&[("enormous", 1000.0), ("a", 0.0)]), &config);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].text, "a");
    }

    #[test]
    fn empty_canvas_places_nothing() {
        let config = CloudConfig::new(0.0, 1);
        assert!(layout(&ranked(5), &config).is_empty());
        assert!(layout(&[], &CloudConfig::new(500.0, 1)).is_empty());
    }
}
