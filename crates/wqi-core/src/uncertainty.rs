use rand::Rng;

/// Half-width of the uniform jitter applied by [`add_uncertainty`].
pub const UNCERTAINTY_SPREAD: f64 = 2.5;

/// Perturbs `index` by a uniform draw in `[-2.5, 2.5]` and clamps the result
/// into [0, 100]. Decorative only; no statistical model stands behind it.
pub fn add_uncertainty<R: Rng>(index: f64, rng: &mut R) -> f64 {
    let offset = rng.gen_range(-UNCERTAINTY_SPREAD..=UNCERTAINTY_SPREAD);
    (index + offset).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn stays_within_spread_and_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for base in [0.0, 1.0, 42.0, 99.0, 100.0] {
            for _ in 0..200 {
                let out = add_uncertainty(base, &mut rng);
                assert!((0.0..=100.0).contains(&out));
                assert!((out - base).abs() <= UNCERTAINTY_SPREAD);
            }
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(12345);
        let mut b = ChaCha8Rng::seed_from_u64(12345);
        let xs: Vec<f64> = (0..10).map(|_| add_uncertainty(50.0, &mut a)).collect();
        let ys: Vec<f64> = (0..10).map(|_| add_uncertainty(50.0, &mut b)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn saturated_index_is_pulled_back_into_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(add_uncertainty(140.0, &mut rng) <= 100.0);
        }
    }
}
