pub mod expression;
pub mod registry;

use std::sync::Arc;

use serde::{Deserialize,Serialize};

use crate::error::{FitError,Result};

pub use expression::parse_expression;

// the only thing sampling needs from a function, whichever way it was made
pub type RealFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionSource {
    // name of a registered builtin
    Builtin(String),
    // formula text
    Expression(String)
}

impl FunctionSource {
    pub fn resolve(&self) -> Result<RealFn> {
        match self {
            FunctionSource::Builtin(name) => registry::by_name(name)
                .map(|function| function.as_real_fn())
                .ok_or_else(|| FitError::UnknownFunction { name:name.clone() }),
            FunctionSource::Expression(text) => parse_expression(text)
        }
    }
}
