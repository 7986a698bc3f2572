// Synthetic market data used when no external source is configured
pub mod random_walk;
pub mod surface;
pub mod swap_curve;

pub use random_walk::{load_equity_history, RandomWalkGenerator, WalkParams};
pub use surface::{load_option_surface, SurfaceSynthesizer};
pub use swap_curve::{load_swap_curve, CurveParams, SwapCurveSynthesizer, TENORS_YEARS};
