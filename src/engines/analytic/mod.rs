//! Closed-form collaborators: validation references and control-variate
//! expectations. All routines here are pure functions of scalar inputs.

pub mod asian;
pub mod barrier;
pub mod black76;
pub mod black_scholes;
pub mod digital;
pub mod lookback;
pub mod merton;
pub mod sabr;

pub use asian::asian_geometric_closed;
pub use barrier::{
    barrier_down_in_call, barrier_down_in_put, barrier_down_out_call, barrier_down_out_put,
    barrier_up_in_call, barrier_up_in_put, barrier_up_out_call, barrier_up_out_put,
};
pub use black76::{
    black76_call, black76_delta, black76_gamma, black76_implied_vol, black76_put, black76_theta,
    black76_vega,
};
pub use black_scholes::{black_scholes_call, black_scholes_price, black_scholes_put};
pub use digital::{digital_asset_call, digital_asset_put, digital_cash_call, digital_cash_put};
pub use lookback::{
    lookback_fixed_call, lookback_fixed_put, lookback_floating_call, lookback_floating_put,
};
pub use merton::{merton_series_call, merton_series_put};
pub use sabr::{sabr_atm_vol, sabr_implied_vol, sabr_implied_vol_from_params};
