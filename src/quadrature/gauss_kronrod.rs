//! # Gauss-Kronrod 15-point rule
//! Piessens, R., de Doncker-Kapenga, E., Überhuber, C. W., & Kahaner, D. K. (1983).
//! *QUADPACK: A Subroutine Package for Automatic Integration*. Springer.
//!
//! The 15-point Kronrod rule embeds the 7-point Gauss rule; their difference
//! drives the error estimate.

use crate::Float;

/// Kronrod abscissae on `[-1, 1]`, positive half. Odd indices are the Gauss nodes.
const XGK: [Float; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

/// Kronrod weights matching [XGK].
const WGK: [Float; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

/// 7-point Gauss weights for `XGK[1]`, `XGK[3]`, `XGK[5]` and the centre.
const WG: [Float; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Estimate of the integral over one interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RuleEstimate {
    pub value: Float,
    pub error: Float,
}

/// Apply the 15-point Gauss-Kronrod rule on `[a, b]`.
/// # Arguments
/// * `f` - Integrand. Never evaluated at `a` or `b`.
/// * `a` - Lower bound
/// * `b` - Upper bound
/// # Returns
/// The Kronrod estimate together with an absolute error estimate.
pub fn gauss_kronrod_15<F: Fn(Float) -> Float + ?Sized>(f: &F, a: Float, b: Float) -> RuleEstimate {
    let centre = 0.5 * (a + b);
    let half_length = 0.5 * (b - a);
    let abs_half_length = half_length.abs();

    let f_centre = f(centre);
    let mut result_gauss = f_centre * WG[3];
    let mut result_kronrod = f_centre * WGK[7];
    let mut result_abs = result_kronrod.abs();

    let mut fv1 = [0.0 as Float; 7];
    let mut fv2 = [0.0 as Float; 7];

    for j in 0..7 {
        let abscissa = half_length * XGK[j];
        let f1 = f(centre - abscissa);
        let f2 = f(centre + abscissa);
        fv1[j] = f1;
        fv2[j] = f2;
        let sum = f1 + f2;
        result_kronrod += WGK[j] * sum;
        result_abs += WGK[j] * (f1.abs() + f2.abs());
        if j % 2 == 1 {
            result_gauss += WG[j / 2] * sum;
        }
    }

    let mean = 0.5 * result_kronrod;
    let mut result_asc = WGK[7] * (f_centre - mean).abs();
    for j in 0..7 {
        result_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let value = result_kronrod * half_length;
    result_abs *= abs_half_length;
    result_asc *= abs_half_length;
    let mut error = ((result_kronrod - result_gauss) * half_length).abs();

    if result_asc != 0.0 && error != 0.0 {
        error = result_asc * (200.0 * error / result_asc).powf(1.5).min(1.0);
    }
    // Round-off floor
    if result_abs > Float::MIN_POSITIVE / (50.0 * Float::EPSILON) {
        error = error.max(50.0 * Float::EPSILON * result_abs);
    }

    RuleEstimate { value, error }
}
