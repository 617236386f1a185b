pub mod convert;

pub use convert::{convert_currency, ConvertInput, ConvertOutput, RateTable};
