pub mod error;
pub mod limits;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "deposits")]
pub mod deposits;

#[cfg(feature = "annuity")]
pub mod annuity;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "currency")]
pub mod currency;

#[cfg(feature = "history")]
pub mod history;

pub use error::FinCalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
