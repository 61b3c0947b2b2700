//! Natural cubic spline over a 4-node window.
//!
//! The interior second derivatives come from the 2x2 tridiagonal system left
//! after imposing `m0 = m3 = 0`, solved in closed form:
//!
//! ```text
//! 2*m1  + u1*m2 = c1
//! l2*m1 + 2*m2  = c2
//! ```
//!
//! with `l`/`u` the segment weights and `c` the divided-difference terms.

use crate::error::{Error, Result};

/// A natural cubic spline through exactly 4 nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalSpline {
    x: [f64; 4],
    y: [f64; 4],
    h: [f64; 3],
    m1: f64,
    m2: f64,
}

impl NaturalSpline {
    /// Derives the interpolant for nodes `(x[i], y[i])`.
    ///
    /// `x` must be strictly increasing; use [`spline`] for checked input.
    pub fn new(x: [f64; 4], y: [f64; 4]) -> Self {
        let h = segments(&x);
        let (_, u1, l2, _) = weights(&h);
        let (c1, c2) = (rhs_c1(&y, h[0], h[1]), rhs_c2(&y, h[1], h[2]));
        let (m1, m2) = (solve_m1(c1, c2, u1, l2), solve_m2(c1, c2, u1, l2));
        Self { x, y, h, m1, m2 }
    }

    /// Second derivatives at the nodes; the outer two are always zero.
    pub fn second_derivatives(&self) -> [f64; 4] {
        [0.0, self.m1, self.m2, 0.0]
    }

    /// Evaluates the spline at `x`.
    ///
    /// Ties at the inner nodes go to the lower segment. Values outside
    /// `[x0, x3]` extrapolate the first or last cubic.
    pub fn eval(&self, x: f64) -> f64 {
        if x <= self.x[1] {
            self.z0(x)
        } else if x <= self.x[2] {
            self.z1(x)
        } else {
            self.z2(x)
        }
    }

    fn z0(&self, x: f64) -> f64 {
        let [x0, x1, _, _] = self.x;
        let [y0, y1, _, _] = self.y;
        let (h0, m1) = (self.h[0], self.m1);

        let v1 = (x - x0) * (x - x0) * (x - x0) * m1 / (6.0 * h0);
        let v2 = -1.0 * y0 * (x - x1) / h0;
        let v3 = (y1 - h0 * h0 * m1 / 6.0) * (x - x0) / h0;
        v1 + v2 + v3
    }

    fn z1(&self, x: f64) -> f64 {
        let [_, x1, x2, _] = self.x;
        let [_, y1, y2, _] = self.y;
        let (h1, m1, m2) = (self.h[1], self.m1, self.m2);

        let v0 = -1.0 * (x - x2) * (x - x2) * (x - x2) * m1 / (6.0 * h1);
        let v1 = (x - x1) * (x - x1) * (x - x1) * m2 / (6.0 * h1);
        let v2 = -1.0 * (y1 - h1 * h1 * m1 / 6.0) * (x - x2) / h1;
        let v3 = (y2 - h1 * h1 * m2 / 6.0) * (x - x1) / h1;
        v0 + v1 + v2 + v3
    }

    fn z2(&self, x: f64) -> f64 {
        let [_, _, x2, x3] = self.x;
        let [_, _, y2, y3] = self.y;
        let (h2, m2) = (self.h[2], self.m2);

        let v0 = -1.0 * (x - x3) * (x - x3) * (x - x3) * m2 / (6.0 * h2);
        let v2 = -1.0 * (y2 - h2 * h2 * m2 / 6.0) * (x - x3) / h2;
        let v3 = y3 * (x - x2) / h2;
        v0 + v2 + v3
    }
}

/// Interpolates `yo[k]` at every `xo[k]` through the nodes `(xi, yi)`.
///
/// `xi` and `yi` must hold exactly 4 values, `xi` strictly increasing;
/// `xo` must be non-empty and `yo` the same length as `xo`.
///
/// ```
/// let mut yo = [0.0; 3];
/// aresample::spline(&[1.0, 2.0, 4.0, 5.0], &[1.0, 3.0, 4.0, 2.0], &[1.5, 2.5, 4.5], &mut yo).unwrap();
/// assert_eq!(yo, [2.046875, 3.765625, 3.140625]);
/// ```
pub fn spline(xi: &[f64], yi: &[f64], xo: &[f64], yo: &mut [f64]) -> Result<()> {
    let xi: [f64; 4] = xi
        .try_into()
        .map_err(|_| Error::InvalidSplineInput("xi must have 4 nodes"))?;
    let yi: [f64; 4] = yi
        .try_into()
        .map_err(|_| Error::InvalidSplineInput("yi must have 4 nodes"))?;
    if xo.is_empty() {
        return Err(Error::InvalidSplineInput("xo is empty"));
    }
    if yo.len() != xo.len() {
        return Err(Error::InvalidSplineInput("yo and xo length differ"));
    }
    if !xi.windows(2).all(|w| w[0] < w[1]) {
        return Err(Error::InvalidSplineInput("xi must be strictly increasing"));
    }

    let s = NaturalSpline::new(xi, yi);
    for (y, &x) in yo.iter_mut().zip(xo) {
        *y = s.eval(x);
    }
    Ok(())
}

fn segments(x: &[f64; 4]) -> [f64; 3] {
    [x[1] - x[0], x[2] - x[1], x[3] - x[2]]
}

/// Returns `(l1, u1, l2, u2)`.
fn weights(h: &[f64; 3]) -> (f64, f64, f64, f64) {
    let [h0, h1, h2] = *h;
    let l1 = h0 / (h1 + h0);
    let u1 = h1 / (h1 + h0);
    let l2 = h1 / (h2 + h1);
    let u2 = h2 / (h2 + h1);
    (l1, u1, l2, u2)
}

fn rhs_c1(y: &[f64; 4], h0: f64, h1: f64) -> f64 {
    6.0 / (h0 + h1) * ((y[2] - y[1]) / h1 - (y[1] - y[0]) / h0)
}

fn rhs_c2(y: &[f64; 4], h1: f64, h2: f64) -> f64 {
    6.0 / (h1 + h2) * ((y[3] - y[2]) / h2 - (y[2] - y[1]) / h1)
}

fn solve_m1(c1: f64, c2: f64, u1: f64, l2: f64) -> f64 {
    (c1 / u1 - c2 / 2.0) / (2.0 / u1 - l2 / 2.0)
}

fn solve_m2(c1: f64, c2: f64, u1: f64, l2: f64) -> f64 {
    (c1 / 2.0 - c2 / l2) / (u1 / 2.0 - 2.0 / l2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XI: [f64; 4] = [1.0, 2.0, 4.0, 5.0];
    const YI: [f64; 4] = [1.0, 3.0, 4.0, 2.0];

    fn assert_close(got: f64, want: f64) {
        assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
    }

    #[test]
    fn test_spline_invalid_input() {
        let mut yo = [0.0];
        assert!(spline(&[], &YI, &[1.5], &mut yo).is_err());
        assert!(spline(&[1.0, 2.0, 3.0], &YI, &[1.5], &mut yo).is_err());
        assert!(spline(&[1.0, 2.0, 3.0, 4.0, 5.0], &YI, &[1.5], &mut yo).is_err());
        assert!(spline(&XI, &[1.0, 2.0, 3.0], &[1.5], &mut yo).is_err());
        assert!(spline(&XI, &YI, &[], &mut []).is_err());
        assert!(spline(&XI, &YI, &[1.5, 2.5], &mut yo).is_err());
        assert!(spline(&[1.0, 1.0, 2.0, 3.0], &YI, &[1.5], &mut yo).is_err());
    }

    #[test]
    fn test_spline_valid_input() {
        let mut yo = [0.0];
        assert!(spline(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0], &[1.5], &mut yo).is_ok());
    }

    #[test]
    fn test_spline_coefficients() {
        let h = segments(&XI);
        assert_eq!(h, [1.0, 2.0, 1.0]);

        let (l1, u1, l2, u2) = weights(&h);
        assert_close(l1, 1.0 / 3.0);
        assert_close(u1, 2.0 / 3.0);
        assert_close(l2, 2.0 / 3.0);
        assert_close(u2, 1.0 / 3.0);

        let (c1, c2) = (rhs_c1(&YI, h[0], h[1]), rhs_c2(&YI, h[1], h[2]));
        assert_close(c1, -3.0);
        assert_close(c2, -5.0);

        let m = NaturalSpline::new(XI, YI).second_derivatives();
        assert_eq!(m[0], 0.0);
        assert_close(m[1], -0.75);
        assert_close(m[2], -2.25);
        assert_eq!(m[3], 0.0);
    }

    #[test]
    fn test_spline_matches_expanded_cubics() {
        // z0 and z1 expand to one cubic, z2 to another
        let left = |x: f64| -x * x * x / 8.0 + 3.0 * x * x / 8.0 + 7.0 * x / 4.0 - 1.0;
        let right = |x: f64| 3.0 * x * x * x / 8.0 - 45.0 * x * x / 8.0 + 103.0 * x / 4.0 - 33.0;

        let s = NaturalSpline::new(XI, YI);
        for x in [1.0, 1.25, 1.5, 2.0] {
            assert_close(s.z0(x), left(x));
        }
        for x in [2.0, 2.5, 3.0, 4.0] {
            assert_close(s.z1(x), left(x));
        }
        for x in [4.0, 4.5, 5.0] {
            assert_close(s.z2(x), right(x));
        }
    }

    #[test]
    fn test_spline_worked_example() {
        let s = NaturalSpline::new(XI, YI);
        assert_close(s.eval(1.5), 2.046875);
        assert_close(s.eval(2.5), 3.765625);
        assert_close(s.eval(4.5), 3.140625);
    }

    #[test]
    fn test_spline_passes_through_nodes() {
        let windows = [
            (XI, YI),
            ([0.0, 1.0, 2.0, 3.0], [17.0, 9.0, 33.0, 5.0]),
            ([10.0, 11.0, 12.0, 13.0], [-32768.0, 32767.0, 0.0, -1.0]),
            ([0.0, 0.5, 2.0, 2.25], [3.0, -7.0, 11.0, 2.0]),
        ];
        for (xi, yi) in windows {
            let mut yo = [0.0; 4];
            spline(&xi, &yi, &xi, &mut yo).unwrap();
            for (got, want) in yo.iter().zip(yi) {
                assert_close(*got, want);
            }
        }
    }

    #[test]
    fn test_spline_resample_vector() {
        let xo = [1.0, 1.5, 2.0, 2.5, 4.0, 4.5, 5.0];
        let mut yo = [0.0; 7];
        spline(&XI, &YI, &xo, &mut yo).unwrap();

        let want = [1.0, 2.046875, 3.0, 3.765625, 4.0, 3.140625, 2.0];
        for (got, want) in yo.iter().zip(want) {
            assert_close(*got, want);
        }
    }

    #[test]
    fn test_spline_uniform_nodes() {
        for start in [0.0, 1.0] {
            let xi = [start, start + 1.0, start + 2.0, start + 3.0];
            let xo: Vec<f64> = (0..7).map(|i| start + i as f64 * 0.5).collect();
            let mut yo = [0.0; 7];
            spline(&xi, &[17.0, 9.0, 33.0, 5.0], &xo, &mut yo).unwrap();

            let want = [17.0, 8.5, 9.0, 22.5, 33.0, 25.0, 5.0];
            for (got, want) in yo.iter().zip(want) {
                assert_close(*got, want);
            }
        }
    }

    #[test]
    fn test_spline_linear_data_is_exact() {
        // natural boundary reproduces straight lines
        let s = NaturalSpline::new([0.0, 1.0, 2.0, 3.0], [0.0, 2.0, 4.0, 6.0]);
        for x in [0.25, 1.5, 2.75, 3.5] {
            assert_close(s.eval(x), 2.0 * x);
        }
    }
}
