//! Turning the inferred `needed_water` vector back into a crisp amount.
//!
//! Each output term is drawn on the shared [0, 100] axis as its membership
//! function clipped at the term's degree. [`vertex_mean`] reduces every shape
//! to the mean of its vertices, which is not the area centroid; callers rely
//! on those exact numbers. [`weighted_vertex_mean`] scales each centroid by its
//! degree, and [`center_of_gravity`] is the area-based method.

use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::math::interp;
use crate::terms::{Membership, NeededWater, Term};

const COG_STEP: f64 = 0.1;

/// Vertices of `term`'s shape at height `degree`.
pub(crate) fn shape(term: NeededWater, degree: f64) -> Vec<(f64, f64)> {
    let d = degree;
    let slack = (1. - d) * 25.;

    match term {
        NeededWater::Little => vec![(0., 0.), (0., d), (25. + slack, d), (50., 0.)],
        NeededWater::Medium if d == 1. => vec![(25., 0.), (50., 1.), (75., 0.)],
        NeededWater::Medium => vec![(25., 0.), (50. - slack, d), (50. + slack, d), (75., 0.)],
        NeededWater::Much => vec![(50., 0.), (75. - slack, d), (100., d), (100., 0.)],
    }
}

/// Arithmetic mean of the vertices, returned as (x, y)
pub(crate) fn centroid(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0., 0.), |(sx, sy), (x, y)| (sx + x, sy + y));

    (sum_x / n, sum_y / n)
}

fn nonzero_total(membership: &Membership<NeededWater>) -> Result<f64> {
    let total = membership.total();

    if total == 0. {
        return Err(FuzzyError::UndefinedDefuzzification {
            variable: NeededWater::VARIABLE,
        });
    }

    Ok(total)
}

/// `(degree, centroid x)` of every term that has a shape. A term whose
/// degree is zero, or that no rule set, is skipped.
fn term_centroids(membership: &Membership<NeededWater>) -> impl Iterator<Item = (f64, f64)> + '_ {
    NeededWater::ALL.into_iter().filter_map(|term| {
        // unset reads as zero here, so it is skipped like a zero degree
        let degree = membership.degree(term);

        if degree == 0. {
            return None;
        }

        let (x, _) = centroid(&shape(term, degree));

        debug!(term = term.name(), degree, centroid = x, "term centroid");

        Some((degree, x))
    })
}

/// Sum of the terms' vertex centroids divided by the sum of their degrees.
///
/// The centroids are not scaled by their degrees, so a lone weak term pushes
/// the result past 100: `[0, 0.25, 0]` gives 200.
pub(crate) fn vertex_mean(membership: &Membership<NeededWater>) -> Result<f64> {
    let total = nonzero_total(membership)?;
    let sum: f64 = term_centroids(membership).map(|(_, x)| x).sum();

    Ok(sum / total)
}

/// Degree-weighted average of the terms' vertex centroids; stays within the
/// output universe.
pub(crate) fn weighted_vertex_mean(membership: &Membership<NeededWater>) -> Result<f64> {
    let total = nonzero_total(membership)?;
    let weighted: f64 = term_centroids(membership).map(|(degree, x)| degree * x).sum();

    Ok(weighted / total)
}

/// Center of gravity of the union of the clipped term shapes, sampled over
/// the output universe.
pub(crate) fn center_of_gravity(membership: &Membership<NeededWater>) -> Result<f64> {
    let universe: Vec<f64> = Linspace::with_step(&NeededWater::UNIVERSE, COG_STEP).collect();
    let aggregated: Vec<f64> = universe
        .iter()
        .map(|&x| {
            NeededWater::ALL
                .into_iter()
                .map(|term| f64::min(membership.degree(term), interp(x, term.points())))
                .fold(0., f64::max)
        })
        .collect();

    if aggregated.iter().sum::<f64>() == 0. {
        return Err(FuzzyError::UndefinedDefuzzification {
            variable: NeededWater::VARIABLE,
        });
    }

    Ok(area_centroid(&universe, &aggregated))
}

/// Splits the area under a sampled membership function into a rectangle and
/// a triangle per sample interval and averages their centers by area.
fn area_centroid(universe: &[f64], membership: &[f64]) -> f64 {
    let mut den = 0.;
    let mut num = 0.;

    for (xs, ys) in universe.windows(2).zip(membership.windows(2)) {
        let base = xs[1] - xs[0];
        let area_rect = f64::min(ys[0], ys[1]) * base;
        let center_rect = xs[0] + base / 2.;
        let (area_tri, center_tri) = if ys[1] == ys[0] {
            (0., 0.)
        } else if ys[1] > ys[0] {
            (base * (ys[1] - ys[0]).abs() / 2., xs[0] + 2. / 3. * base)
        } else {
            (base * (ys[1] - ys[0]).abs() / 2., xs[0] + 1. / 3. * base)
        };
        let area = area_rect + area_tri;

        if area == 0. {
            continue;
        }

        den += area;
        num += area_rect * center_rect + area_tri * center_tri;
    }

    num / den
}

#[cfg(test)]
fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

#[test]
fn test_shapes() {
    assert_eq!(
        shape(NeededWater::Little, 1.),
        vec![(0., 0.), (0., 1.), (25., 1.), (50., 0.)]
    );
    assert_eq!(
        shape(NeededWater::Medium, 1.),
        vec![(25., 0.), (50., 1.), (75., 0.)]
    );
    assert_eq!(
        shape(NeededWater::Medium, 0.5),
        vec![(25., 0.), (37.5, 0.5), (62.5, 0.5), (75., 0.)]
    );
    assert_eq!(
        shape(NeededWater::Much, 0.2),
        vec![(50., 0.), (55., 0.2), (100., 0.2), (100., 0.)]
    );
}

#[test]
fn test_centroid_is_vertex_mean() {
    assert_eq!(centroid(&shape(NeededWater::Little, 1.)), (18.75, 0.5));
    assert_eq!(centroid(&shape(NeededWater::Medium, 1.)).0, 50.);
    assert_eq!(centroid(&shape(NeededWater::Much, 1.)).0, 81.25);
}

#[test]
fn test_vertex_mean_single_terms() {
    let little = Membership::from_degrees([1., 0., 0.]);
    let medium = Membership::from_degrees([0., 1., 0.]);
    let much = Membership::from_degrees([0., 0., 1.]);

    assert_eq!(vertex_mean(&little), Ok(18.75));
    assert_eq!(vertex_mean(&medium), Ok(50.));
    assert_eq!(vertex_mean(&much), Ok(81.25));
}

#[test]
fn test_vertex_mean_divides_unscaled_centroids() {
    // little: (0 + 0 + 37.5 + 50) / 4, medium: (25 + 37.5 + 62.5 + 75) / 4
    let membership = Membership::from_degrees([0.5, 0.5, 0.]);

    assert_eq!(vertex_mean(&membership), Ok(71.875));

    // medium at 0.25: (25 + 31.25 + 68.75 + 75) / 4 = 50, over a total of 0.25
    let weak = Membership::from_degrees([0., 0.25, 0.]);

    assert_eq!(vertex_mean(&weak), Ok(200.));
}

#[test]
fn test_weighted_vertex_mean() {
    let membership = Membership::from_degrees([0.5, 0.5, 0.]);

    assert_eq!(weighted_vertex_mean(&membership), Ok(35.9375));
    assert_eq!(weighted_vertex_mean(&Membership::from_degrees([0., 0.25, 0.])), Ok(50.));
    assert!(weighted_vertex_mean(&Membership::new()).is_err());
}

#[test]
fn test_vertex_mean_skips_unset_terms() {
    let mut membership = Membership::new();

    membership.set(NeededWater::Medium, 1.);

    assert_eq!(vertex_mean(&membership), Ok(50.));
}

#[test]
fn test_vertex_mean_all_zero() {
    let err = Err(FuzzyError::UndefinedDefuzzification {
        variable: "needed_water",
    });

    assert_eq!(vertex_mean(&Membership::from_degrees([0., 0., 0.])), err);
    assert_eq!(vertex_mean(&Membership::new()), err);
}

#[test]
fn test_center_of_gravity() {
    let medium = center_of_gravity(&Membership::from_degrees([0., 1., 0.])).unwrap();
    let little = center_of_gravity(&Membership::from_degrees([1., 0., 0.])).unwrap();

    assert!(approx_eq(medium, 50., 1e-6), "{medium}");
    // rectangle over [0, 25] plus a triangle over [25, 50]
    assert!(approx_eq(little, 175. / 9., 1e-6), "{little}");
    assert!(center_of_gravity(&Membership::new()).is_err());
}
