// least squares fitting of lines and parabolas to points
// sampled from a function or imported from a json file

pub mod data;
pub mod error;
pub mod functions;
pub mod linear_algebra;
pub mod request;
pub mod scientific_computing;

pub use error::{FitError,Result};
