pub mod least_squares;
pub mod sampling;
pub mod statistics;

pub use least_squares::{FitCoefficients,LsmCalculator,Model};
pub use sampling::{Domain,sample};
