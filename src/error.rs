use thiserror::Error;

use crate::linear_algebra::matrix::MatrixError;
use crate::scientific_computing::least_squares::Model;

#[derive(Error,Debug)]
pub enum FitError {
    #[error("invalid domain [{start}, {end}] with {step_count} steps: {reason}")]
    InvalidDomain{start:f64,end:f64,step_count:i64,reason:&'static str},
    #[error("function is undefined at x = {x}")]
    FunctionEvaluation{x:f64},
    #[error("normal equations of the {model} model are singular")]
    SingularSystem{model:Model,#[source] source:MatrixError},
    #[error("malformed point data: {reason}")]
    Format{reason:String},
    #[error("cannot parse expression {text:?}: {reason}")]
    ExpressionParse{text:String,reason:String},
    #[error("no built-in function named {name:?}")]
    UnknownFunction{name:String},
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("cannot access {}", .path.display())]
    Io{path:std::path::PathBuf,#[source] source:std::io::Error}
}

pub type Result<T> = std::result::Result<T,FitError>;
