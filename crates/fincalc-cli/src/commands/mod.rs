pub mod annuity;
pub mod currency;
pub mod deposits;
pub mod loan;
pub mod tax;
