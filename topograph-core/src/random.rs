//! Narrow random-number interface consumed by the randomised generators.
//!
//! Generators only ever ask for uniform floats in `[0, 1)`; everything else
//! is derived here. Any [`rand::RngCore`] is a [`RandomSource`], so seeded
//! [`rand::rngs::SmallRng`] instances give reproducible graphs while tests can
//! script exact draws with their own implementation.

use rand::{Rng, RngCore};

use crate::store::{CANVAS_SIZE, Position};

/// Source of uniform random floats.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use topograph_core::RandomSource;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let value = rng.next_float();
/// assert!((0.0..1.0).contains(&value));
/// assert!(rng.next_index(10) < 10);
/// ```
pub trait RandomSource {
    /// Returns a uniform float in `[0, 1)`.
    fn next_float(&mut self) -> f64;

    /// Returns a uniform index in `0..bound`, or `0` when `bound` is zero.
    fn next_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let index = (self.next_float() * bound as f64) as usize;
        index.min(bound - 1)
    }

    /// Returns `true` with probability `probability`.
    fn next_bool(&mut self, probability: f64) -> bool {
        self.next_float() < probability
    }

    /// Returns a uniform float in `[low, high)`.
    fn next_range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_float() * (high - low)
    }

    /// Returns a uniform position on the drawing surface.
    fn next_position(&mut self) -> Position {
        let x = self.next_range(0.0, CANVAS_SIZE);
        let y = self.next_range(0.0, CANVAS_SIZE);
        Position::new(x, y)
    }

    /// Shuffles `items` in place (Fisher-Yates).
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for upper in (1..items.len()).rev() {
            let pick = self.next_index(upper + 1);
            items.swap(upper, pick);
        }
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_float(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}


#[cfg(test)]
mod tests {
    use super::{RandomSource, scripted::ScriptedSource};
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.25, 2)]
    #[case(0.999_999, 9)]
    fn next_index_scales_draw(#[case] draw: f64, #[case] expected: usize) {
        let mut source = ScriptedSource::new(vec![draw]);
        assert_eq!(source.next_index(10), expected);
    }

    #[rstest]
    fn next_index_handles_empty_range() {
        let mut source = ScriptedSource::new(vec![0.5]);
        assert_eq!(source.next_index(0), 0);
    }

    #[rstest]
    fn next_bool_is_strict_against_probability() {
        let mut source = ScriptedSource::new(vec![0.5]);
        assert!(!source.next_bool(0.5));
        assert!(source.next_bool(0.500_1));
        assert!(!source.next_bool(0.0));
    }

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(0.5, 15.0)]
    fn next_range_maps_draw_linearly(#[case] draw: f64, #[case] expected: f64) {
        let mut source = ScriptedSource::new(vec![draw]);
        assert_eq!(source.next_range(10.0, 20.0), expected);
    }

    #[rstest]
    fn shuffle_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut items: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[rstest]
    fn positions_stay_on_canvas() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let position = rng.next_position();
            assert!((0.0..super::CANVAS_SIZE).contains(&position.x));
            assert!((0.0..super::CANVAS_SIZE).contains(&position.y));
        }
    }
}
