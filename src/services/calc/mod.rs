pub mod calculation;
pub mod error;
pub mod operations;

pub use calculation::{Calculation, CalculationType};
pub use error::CalcError;
