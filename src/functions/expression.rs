// user typed formulas in at most one variable, e.g. "sin(x)^2 + 3*x"
use std::sync::Arc;

use exmex::prelude::*;

use super::RealFn;
use crate::error::{FitError,Result};

// a parsed expression must be finite at one of these
// before it is handed out
const SMOKE_TEST_INPUTS:[f64;5] = [1.0,0.5,2.0,-1.0,0.0];

fn parse_error(text:&str,reason:impl Into<String>) -> FitError {
    FitError::ExpressionParse { text:text.to_string(), reason:reason.into() }
}

// evaluation failures surface as NaN, which sampling reports
// as the function being undefined at that x
pub fn parse_expression(text:&str) -> Result<RealFn> {
    let source = text.trim();
    if source.is_empty() {
        return Err(parse_error(text,"expression is empty"))
    }
    let expr = exmex::parse::<f64>(source).map_err(|e| parse_error(text,e.to_string()))?;

    let arity = expr.var_names().len();
    if arity > 1 {
        return Err(parse_error(text,format!("expected at most one variable, found {:?}",expr.var_names())))
    }
    log::debug!("parsed expression {source:?} with variables {:?}",expr.var_names());

    let function = move |x:f64| {
        let vars = [x];
        expr.eval(&vars[..arity]).unwrap_or(f64::NAN)
    };
    if !SMOKE_TEST_INPUTS.iter().any(|x| function(*x).is_finite()) {
        return Err(parse_error(text,format!("expression is undefined at every one of {SMOKE_TEST_INPUTS:?}")))
    }
    Ok(Arc::new(function))
}
