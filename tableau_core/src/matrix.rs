// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal 2D affine matrix.
//!
//! [`Matrix2d`] stores the six coefficients `(a, b, c, d, tx, ty)` of the map
//!
//! ```text
//! x' = a·x + c·y + tx
//! y' = b·x + d·y + ty
//! ```
//!
//! The layout matches [`kurbo::Affine`], and conversions are provided in
//! both directions. The type exists separately because transform composition
//! has to follow a fixed concatenation order (see [`Matrix2d::concat`]) and
//! point transformation takes per-call flags.

use kurbo::{Affine, Point, Vec2};

/// A 2D affine transform `(a, b, c, d, tx, ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2d {
    /// Horizontal scale / rotation term applied to `x`.
    pub a: f64,
    /// Vertical skew / rotation term applied to `x`.
    pub b: f64,
    /// Horizontal skew / rotation term applied to `y`.
    pub c: f64,
    /// Vertical scale / rotation term applied to `y`.
    pub d: f64,
    /// Horizontal translation.
    pub tx: f64,
    /// Vertical translation.
    pub ty: f64,
}

impl Matrix2d {
    /// The identity matrix `(1, 0, 0, 1, 0, 0)`.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a matrix from its six coefficients.
    #[inline]
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Returns the coefficients as `[a, b, c, d, tx, ty]`.
    #[inline]
    #[must_use]
    pub const fn as_coeffs(self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }

    /// Composes the given transform onto this one, in place.
    ///
    /// The result applies `self` first and the given transform second, i.e.
    /// in column-vector notation `self = given * self`. Accumulating from a
    /// node outward to its root with this method produces the node-to-world
    /// transform.
    pub fn concat(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) {
        let Self {
            a: a0,
            b: b0,
            c: c0,
            d: d0,
            tx: tx0,
            ty: ty0,
        } = *self;

        self.a = a0 * a + b0 * c;
        self.b = a0 * b + b0 * d;
        self.c = c0 * a + d0 * c;
        self.d = c0 * b + d0 * d;
        self.tx = tx0 * a + ty0 * c + tx;
        self.ty = tx0 * b + ty0 * d + ty;
    }

    /// Composes another matrix onto this one. See [`concat`](Self::concat).
    #[inline]
    pub fn concat_matrix(&mut self, other: &Self) {
        self.concat(other.a, other.b, other.c, other.d, other.tx, other.ty);
    }

    /// Appends a translation.
    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    /// Appends a non-uniform scale.
    #[inline]
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concat(sx, 0.0, 0.0, sy, 0.0, 0.0);
    }

    /// Appends a rotation (radians, clockwise in y-down space).
    pub fn rotate(&mut self, radians: f64) {
        let dir = Vec2::from_angle(radians);
        let (cos, sin) = (dir.x, dir.y);
        self.concat(cos, sin, -sin, cos, 0.0, 0.0);
    }

    /// Transforms a point.
    ///
    /// With `ignore_translation` the `tx`/`ty` terms are dropped. With
    /// `ignore_scale` each column of the linear part is normalized to unit
    /// length before use, so only the direction of the axes survives;
    /// degenerate (zero-length) columns are used unchanged.
    #[must_use]
    pub fn transform_point(&self, point: Point, ignore_translation: bool, ignore_scale: bool) -> Point {
        let (mut a, mut b, mut c, mut d) = (self.a, self.b, self.c, self.d);
        if ignore_scale {
            let sx = Vec2::new(a, b).hypot();
            if sx != 0.0 {
                a /= sx;
                b /= sx;
            }
            let sy = Vec2::new(c, d).hypot();
            if sy != 0.0 {
                c /= sy;
                d /= sy;
            }
        }

        let mut x = a * point.x + c * point.y;
        let mut y = b * point.x + d * point.y;
        if !ignore_translation {
            x += self.tx;
            y += self.ty;
        }
        Point::new(x, y)
    }

    /// Returns the determinant of the linear part.
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns the inverse transform, or `None` if the matrix is singular or
    /// not finite.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            tx: (self.c * self.ty - self.d * self.tx) / det,
            ty: (self.b * self.tx - self.a * self.ty) / det,
        })
    }

    /// Is this matrix [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }

    /// Is any coefficient [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        self.a.is_nan()
            || self.b.is_nan()
            || self.c.is_nan()
            || self.d.is_nan()
            || self.tx.is_nan()
            || self.ty.is_nan()
    }
}

impl Default for Matrix2d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Matrix2d> for Affine {
    #[inline]
    fn from(m: Matrix2d) -> Self {
        Self::new(m.as_coeffs())
    }
}

impl From<Affine> for Matrix2d {
    #[inline]
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, tx, ty] = affine.as_coeffs();
        Self { a, b, c, d, tx, ty }
    }
}
