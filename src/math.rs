use num::Float;

/// Similar to numpy.interp for a single point: linear interpolation between
/// sorted `coords`, saturating to the first/last y outside them.
///
/// A NaN `x` falls between no pair of coordinates and comes back as NaN.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (coords.first(), coords.last()) else {
        return F::nan();
    };

    // Base cases
    if x < first_x {
        return first_y;
    }
    if x > last_x {
        return last_y;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        // Actual interpolation
        if x1 <= x && x <= x2 {
            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    // Single coordinate, or NaN
    if x == first_x {
        first_y
    } else {
        F::nan()
    }
}

#[test]
fn test_interp() {
    let coords = [(1., 3.), (2., 2.), (3., 0.)];
    let xs = [0., 1., 1.5, 2.72, 3.24];
    let expected = [3., 3., 2.5, 0.5599999999999996, 0.];

    for (x, y) in xs.into_iter().zip(expected) {
        assert_eq!(interp(x, &coords), y);
    }

    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(2.5, &coords), 4.);
    assert_eq!(interp(-1., &coords), 0.);
    assert_eq!(interp(7.5, &coords), 2.);
}

#[test]
fn test_interp_degenerate() {
    assert!(interp(1.0f64, &[]).is_nan());
    assert!(interp(f64::NAN, &[(0., 1.), (1., 0.)]).is_nan());
    assert_eq!(interp(5.0f64, &[(5., 0.25)]), 0.25);
}
