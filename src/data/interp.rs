//! One-dimensional piecewise-linear interpolation.
//!
//! Same results as NumPy's `interp` with default fill values:
//!
//! * `x` above the last knot gives the last `y`, below the first knot gives
//!   the first `y` (tested in that order);
//! * a single knot always gives its `y`;
//! * otherwise a bisection finds the last knot with `xs[j] <= x`.
//!
//! For unsorted `xs` the answer is deterministic but carries no meaning.

/// Interpolate `ys` over `xs` at `x`.
///
/// # Panics
/// If `xs` is empty or the slices differ in length.
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    assert!(!xs.is_empty(), "interp needs at least one knot");
    assert_eq!(xs.len(), ys.len(), "interp knots and values differ in length");

    let last = xs.len() - 1;
    if last == 0 {
        return ys[0];
    }
    if x.is_nan() {
        return x;
    }
    if x > xs[last] {
        return ys[last];
    }
    if x < xs[0] {
        return ys[0];
    }

    let j = bracket(x, xs);
    if j == last || xs[j] == x {
        return ys[j];
    }

    let slope = (ys[j + 1] - ys[j]) / (xs[j + 1] - xs[j]);
    let y = slope * (x - xs[j]) + ys[j];
    if y.is_nan() {
        // Infinite slope across a vertical step; retry from the right knot.
        let y = slope * (x - xs[j + 1]) + ys[j + 1];
        if y.is_nan() && ys[j] == ys[j + 1] {
            return ys[j];
        }
        return y;
    }
    y
}

/// Index of the last knot not greater than `x`, given `xs[0] <= x <= xs[last]`.
fn bracket(x: f64, xs: &[f64]) -> usize {
    let (mut lo, mut hi) = (0, xs.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if x >= xs[mid] {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f64; 4] = [0.0, 5.0, 12.0, 20.0];
    const YS: [f64; 4] = [0.0, 500.0, 1200.0, 1500.0];

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(interp(0.0, &XS, &YS), 0.0);
        assert_eq!(interp(20.0, &XS, &YS), 1500.0);
    }

    #[test]
    fn knots_are_exact() {
        assert_eq!(interp(5.0, &XS, &YS), 500.0);
        assert_eq!(interp(12.0, &XS, &YS), 1200.0);
    }

    #[test]
    fn linear_between_knots() {
        assert!((interp(2.5, &XS, &YS) - 250.0).abs() < 1e-9);
        assert!((interp(8.5, &XS, &YS) - 850.0).abs() < 1e-9);
        assert!((interp(16.0, &XS, &YS) - 1350.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_outside_range() {
        assert_eq!(interp(-3.0, &XS, &YS), 0.0);
        assert_eq!(interp(99.0, &XS, &YS), 1500.0);
    }

    #[test]
    fn single_knot() {
        assert_eq!(interp(-1.0, &[4.0], &[7.0]), 7.0);
        assert_eq!(interp(9.0, &[4.0], &[7.0]), 7.0);
    }

    #[test]
    fn nan_propagates() {
        assert!(interp(f64::NAN, &XS, &YS).is_nan());
    }

    #[test]
    fn repeated_knots_take_the_later_value() {
        let xs = [0.0, 5.0, 5.0, 10.0];
        let ys = [0.0, 100.0, 300.0, 400.0];
        assert_eq!(interp(5.0, &xs, &ys), 300.0);
        assert!((interp(7.5, &xs, &ys) - 350.0).abs() < 1e-9);
    }

    #[test]
    fn descending_knots_check_last_knot_first() {
        // Anything above the final age clamps to the final depth, anything
        // else below the first age to the first depth.
        let xs = [12.0, 5.0, 0.0];
        let ys = [0.0, 700.0, 1200.0];
        assert_eq!(interp(12.0, &xs, &ys), 1200.0);
        assert_eq!(interp(3.0, &xs, &ys), 1200.0);
        assert_eq!(interp(0.0, &xs, &ys), 0.0);
        assert_eq!(interp(-1.0, &xs, &ys), 0.0);
    }
}
