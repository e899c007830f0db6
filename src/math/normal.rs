//! Standard normal density, distribution, and inverse distribution.

/// Standard normal probability density.
#[inline]
pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution.
///
/// Abramowitz & Stegun 7.1.26, absolute error below 7.5e-8; plenty of
/// headroom for Monte Carlo tolerances.
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * z);
    let poly = t
        * (0.319_381_530
            + t * (-0.356_563_782
                + t * (1.781_477_937 + t * (-1.821_255_978 + t * 1.330_274_429))));
    let approx = 1.0 - normal_pdf(z) * poly;
    if x >= 0.0 { approx } else { 1.0 - approx }
}

/// Inverse standard normal CDF (Moro's algorithm).
///
/// Rational approximation in the central region |u - 0.5| < 0.42, a series
/// in log(-log(r)) in the tails. Inputs are expected to be clamped away
/// from 0 and 1 by the caller; see [`crate::math::sobol`].
pub fn inverse_normal_cdf(u: f64) -> f64 {
    const A: [f64; 4] = [
        2.506_628_238_84,
        -18.615_000_625_29,
        41.391_197_735_34,
        -25.441_060_496_37,
    ];
    const B: [f64; 4] = [
        -8.473_510_930_90,
        23.083_367_437_43,
        -21.062_241_018_26,
        3.130_829_098_33,
    ];
    const C: [f64; 9] = [
        0.337_475_482_272_614_7,
        0.976_169_019_091_718_6,
        0.160_797_971_491_820_9,
        0.027_643_881_033_386_3,
        0.003_840_572_937_360_9,
        0.000_395_189_651_191_9,
        0.000_032_176_788_176_8,
        0.000_000_288_816_736_4,
        0.000_000_396_031_518_7,
    ];

    let x = u - 0.5;

    if x.abs() < 0.42 {
        let r = x * x;
        return x * (((A[3] * r + A[2]) * r + A[1]) * r + A[0])
            / ((((B[3] * r + B[2]) * r + B[1]) * r + B[0]) * r + 1.0);
    }

    let mut r = if x > 0.0 { 1.0 - u } else { u };
    r = (-r.ln()).ln();
    let mut v = C[0]
        + r * (C[1]
            + r * (C[2]
                + r * (C[3]
                    + r * (C[4] + r * (C[5] + r * (C[6] + r * (C[7] + r * C[8])))))));
    if x < 0.0 {
        v = -v;
    }
    v
}
