// Closed-form option pricing
pub mod black_scholes;

pub use black_scholes::{black_scholes_call, norm_cdf, CallOption};
