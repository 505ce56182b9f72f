use core::f32::consts::PI;

/// Eccentricity reported for ellipses with a zero minor axis.
pub const ECC_UNBOUNDED: f32 = 1e10;

/// Implicit ellipse `a*x^2 + b*x*y + c*y^2 = f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub f: f32,
}

/// Ellipse in radius/angle form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Semi-major axis.
    pub a: f32,
    /// Semi-minor axis.
    pub b: f32,
    /// Angle of the major axis, radians.
    pub th: f32,
    /// `a / b`, or [`ECC_UNBOUNDED`] when `b == 0`.
    pub ecc: f32,
}

/// Converts an implicit ellipse to radii and angle.
///
/// Every branch avoids dividing by values that may have collapsed to zero;
/// a vanishing `f` yields a zero minor axis and unbounded eccentricity.
pub fn ewa_imp2radangle(q: Quadratic) -> Ellipse {
    let Quadratic { a, b, c, f } = q;
    if f <= 1e-5 {
        return Ellipse {
            a: a.max(c).sqrt(),
            b: 0.0,
            th: 0.5 * (b.atan2(a - c) + PI),
            ecc: ECC_UNBOUNDED,
        };
    }

    let amc = a - c;
    let apc = a + c;
    let f2 = f * 2.0;
    let r = (amc * amc + b * b).sqrt();

    let d = apc - r;
    let major = if d <= 0.0 {
        a.max(c).sqrt()
    } else {
        (f2 / d).sqrt()
    };

    let d = apc + r;
    let (minor, ecc) = if d <= 0.0 {
        (0.0, ECC_UNBOUNDED)
    } else {
        let minor = (f2 / d).sqrt();
        (minor, major / minor)
    };

    Ellipse {
        a: major,
        b: minor,
        // atan2 gives the minor-axis direction; the major axis is a quarter turn on.
        th: 0.5 * (b.atan2(amc) + PI),
        ecc,
    }
}

/// Builds the implicit form of an ellipse from squared radii and angle.
pub fn ewa_radangle2imp(a2: f32, b2: f32, th: f32) -> Quadratic {
    let ct = th.cos();
    let ct2 = ct * ct;
    let st2 = 1.0 - ct2;
    Quadratic {
        a: a2 * st2 + b2 * ct2,
        b: (b2 - a2) * (2.0 * th).sin(),
        c: a2 * ct2 + b2 * st2,
        f: a2 * b2,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use super::{ECC_UNBOUNDED, Quadratic, ewa_imp2radangle, ewa_radangle2imp};

    #[test]
    fn unit_circle() {
        let e = ewa_imp2radangle(Quadratic {
            a: 1.0,
            b: 0.0,
            c: 1.0,
            f: 1.0,
        });

        assert_eq!(e.a, 1.0);
        assert_eq!(e.b, 1.0);
        assert_eq!(e.ecc, 1.0);
        assert_abs_diff_eq!(e.th, FRAC_PI_2);
    }

    #[test]
    fn axis_aligned_ellipse_major_along_x() {
        // x^2 + 4y^2 = 4: semi-axes 2 (x) and 1 (y).
        let e = ewa_imp2radangle(Quadratic {
            a: 1.0,
            b: 0.0,
            c: 4.0,
            f: 4.0,
        });

        assert_abs_diff_eq!(e.a, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(e.b, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(e.ecc, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(e.th, PI, epsilon = 1e-6);
    }

    #[test]
    fn collapsed_f_reports_unbounded_eccentricity() {
        let e = ewa_imp2radangle(Quadratic {
            a: 4.0,
            b: 0.0,
            c: 1.0,
            f: 0.0,
        });

        assert_eq!(e.a, 2.0);
        assert_eq!(e.b, 0.0);
        assert_eq!(e.ecc, ECC_UNBOUNDED);
    }

    #[test]
    fn radangle_round_trip_for_rotated_ellipse() {
        let (a2, b2, th) = (9.0f32, 2.25f32, FRAC_PI_4 + 0.3);
        let q = ewa_radangle2imp(a2, b2, th);
        assert_abs_diff_eq!(q.f, a2 * b2);
        // A*C - B^2/4 equals F for a well-formed implicit ellipse.
        assert_abs_diff_eq!(q.a * q.c - 0.25 * q.b * q.b, q.f, epsilon = 1e-3);

        let e = ewa_imp2radangle(q);
        assert_abs_diff_eq!(e.a, 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(e.b, 1.5, epsilon = 1e-4);
        assert_abs_diff_eq!(e.ecc, 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(e.th.rem_euclid(PI), th, epsilon = 1e-4);
    }
}
