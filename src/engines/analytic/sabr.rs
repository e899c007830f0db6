//! Hagan et al. (2002) SABR implied Black volatility.
//!
//! The asymptotic expansion returns a lognormal vol usable directly in
//! Black-76. The ATM branch avoids the 0/0 in z/χ(z); the general branch
//! guards the χ(z) ratio for small z and for ρ → 1.

use crate::models::SabrParams;

/// Hagan implied Black vol for a general strike.
pub fn sabr_implied_vol(
    forward: f64,
    strike: f64,
    time: f64,
    alpha: f64,
    beta: f64,
    rho: f64,
    nu: f64,
) -> f64 {
    // Alpha is the natural fallback for degenerate inputs.
    if alpha < 1e-10 || time < 1e-10 || forward <= 0.0 || strike <= 0.0 {
        return alpha;
    }

    if (forward - strike).abs() < 1e-7 * forward {
        return sabr_atm_vol(forward, time, alpha, beta, rho, nu);
    }

    let one_beta = 1.0 - beta;
    let fk = forward * strike;
    let log_fk = (forward / strike).ln();
    let log_fk2 = log_fk * log_fk;
    let log_fk4 = log_fk2 * log_fk2;

    let fk_mid = fk.powf(0.5 * one_beta);
    let fk_full = fk.powf(one_beta);

    let z = (nu / alpha) * fk_mid * log_fk;

    let z_over_chi = if z.abs() < 1e-6 {
        1.0
    } else {
        let sqrt_term = (1.0 - 2.0 * rho * z + z * z).sqrt();
        if (1.0 - rho).abs() < 1e-10 {
            z / (1.0 - 0.5 * z)
        } else {
            z / ((sqrt_term + z - rho) / (1.0 - rho)).ln()
        }
    };

    let denom = 1.0
        + (one_beta * one_beta / 24.0) * log_fk2
        + (one_beta * one_beta * one_beta * one_beta / 1920.0) * log_fk4;

    let eps1 = (one_beta * one_beta / 24.0) * (alpha * alpha / fk_full);
    let eps2 = (rho * beta * nu * alpha / 4.0) / fk_mid;
    let eps3 = ((2.0 - 3.0 * rho * rho) / 24.0) * nu * nu;
    let time_corr = 1.0 + (eps1 + eps2 + eps3) * time;

    (alpha / (fk_mid * denom)) * z_over_chi * time_corr
}

/// Hagan implied vol at the money.
pub fn sabr_atm_vol(forward: f64, time: f64, alpha: f64, beta: f64, rho: f64, nu: f64) -> f64 {
    if alpha < 1e-10 || forward <= 0.0 {
        return alpha;
    }

    let one_beta = 1.0 - beta;
    let alpha_adj = alpha / forward.powf(one_beta);

    let eps1 = (one_beta * one_beta / 24.0) * alpha_adj * alpha_adj;
    let eps2 = (rho * beta * nu / 4.0) * alpha_adj;
    let eps3 = ((2.0 - 3.0 * rho * rho) / 24.0) * nu * nu;

    alpha_adj * (1.0 + (eps1 + eps2 + eps3) * time)
}

/// Implied vol from a bound parameter block.
pub fn sabr_implied_vol_from_params(
    params: SabrParams,
    forward: f64,
    strike: f64,
    time: f64,
) -> f64 {
    sabr_implied_vol(
        forward,
        strike,
        time,
        params.alpha,
        params.beta,
        params.rho,
        params.nu,
    )
}
