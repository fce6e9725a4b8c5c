pub const FIBONACCI_LEN: usize = 28;

/// Fibonacci sequence starting `1, 1, 2, 3, ...`, used to pick divergence
/// angles between consecutive leaf whorls.
pub const FIBONACCI: [u32; FIBONACCI_LEN] = [
    1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987, 1597, 2584, 4181, 6765,
    10946, 17711, 28657, 46368, 75025, 121393, 196418, 317811,
];

/// Largest index `i` such that `FIBONACCI[i + 1]` still exists.
pub const MAX_WHORL_INDEX: usize = FIBONACCI_LEN - 2;

/// Fraction of a half turn between two whorls, `F(i) / F(i + 1)`.
/// `index` must be at most [`MAX_WHORL_INDEX`].
pub fn fibonacci_ratio(index: usize) -> f32 {
    FIBONACCI[index] as f32 / FIBONACCI[index + 1] as f32
}

/// Powers of negative numbers are not defined for the growth curve,
/// everything below zero collapses to zero.
pub fn allometric_scale(growth: f32, exponent: f32) -> f32 {
    f32::max(growth, 0.).powf(exponent)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fibonacci_table_is_consistent() {
        assert_eq!(FIBONACCI[0], 1);
        assert_eq!(FIBONACCI[1], 1);
        for i in 2..FIBONACCI_LEN {
            assert_eq!(FIBONACCI[i], FIBONACCI[i - 1] + FIBONACCI[i - 2]);
        }
    }

    #[test]
    fn ratio_converges_to_golden_section() {
        let golden = (5f32.sqrt() - 1.) / 2.;
        assert_relative_eq!(fibonacci_ratio(MAX_WHORL_INDEX), golden, epsilon = 1e-6);
        assert_relative_eq!(fibonacci_ratio(1), 0.5);
        assert_relative_eq!(fibonacci_ratio(5), 8. / 13.);
    }

    #[test]
    fn scale_of_zero_growth() {
        assert_eq!(allometric_scale(0., 0.33), 0.);
        assert_eq!(allometric_scale(0., 0.), 1.);
        assert_eq!(allometric_scale(-0.5, 0.33), 0.);
        assert_relative_eq!(allometric_scale(8., 1. / 3.), 2., epsilon = 1e-5);
    }
}
