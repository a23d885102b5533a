//! 2-D affine transforms in surface pixel space.
//!
//! Coordinates follow raster conventions: origin top-left, y pointing down.
//! A point `(x, y)` maps to:
//!
//! ```text
//! X = a * x + c * y + e
//! Y = b * x + d * y + f
//! ```
//!
//! which is the same matrix layout a 2-D canvas `setTransform(a, b, c, d, e, f)`
//! uses, so a positive rotation turns content clockwise on screen.

/// An affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Rotation about the origin, positive = clockwise on screen.
    ///
    /// Quarter turns produce exact 0/±1 entries so that 90° draws stay
    /// pixel-aligned.
    pub fn rotate_degrees(angle_degrees: f64) -> Self {
        let (sin, cos) = quarter_turn_sin_cos(angle_degrees)
            .unwrap_or_else(|| angle_degrees.to_radians().sin_cos());
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Transform that applies `self` first, then `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    /// Axis-aligned bounds `(min_x, min_y, max_x, max_y)` of the transformed
    /// rectangle `0..width x 0..height`.
    pub fn map_bounds(&self, width: f64, height: f64) -> (f64, f64, f64, f64) {
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(width, 0.0),
            self.apply(0.0, height),
            self.apply(width, height),
        ];
        corners.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        )
    }
}

/// Angles within this many degrees of a multiple of 90° are treated as
/// exact quarter turns, both when sizing a rotated box and when drawing.
pub(crate) const QUARTER_TURN_TOLERANCE_DEGREES: f64 = 0.001;

/// Number of clockwise quarter turns (0-3) when `angle_degrees` is a
/// multiple of 90° within [`QUARTER_TURN_TOLERANCE_DEGREES`].
pub(crate) fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let turns = (angle_degrees / 90.0).round();
    let off = (angle_degrees - turns * 90.0).abs();
    if off.is_nan() || off > QUARTER_TURN_TOLERANCE_DEGREES {
        return None;
    }
    Some((turns as i64).rem_euclid(4) as u8)
}

/// Exact `(sin, cos)` for quarter turns.
fn quarter_turn_sin_cos(angle_degrees: f64) -> Option<(f64, f64)> {
    match quarter_turns(angle_degrees)? {
        0 => Some((0.0, 1.0)),
        1 => Some((1.0, 0.0)),
        2 => Some((0.0, -1.0)),
        _ => Some((-1.0, 0.0)),
    }
}
