// one immutable request in, one report out; nothing is kept between calls
use std::path::Path;

use serde::{Deserialize,Serialize};

use crate::data::PointSet;
use crate::error::{FitError,Result};
use crate::functions::FunctionSource;
use crate::scientific_computing::least_squares::{FitCoefficients,LsmCalculator,Model};
use crate::scientific_computing::sampling::{Domain,sample};
use crate::scientific_computing::statistics::FitQuality;

// sampling a function and importing raw points are separate inputs,
// imported points are never turned back into a domain
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitInput {
    Function{source:FunctionSource,domain:Domain},
    Points(PointSet)
}

#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
#[serde(default)]
pub struct ModelFlags {
    pub linear:bool,
    pub parabolic:bool
}

impl Default for ModelFlags {
    fn default() -> Self {
        Self { linear:true, parabolic:true }
    }
}

impl ModelFlags {
    pub fn enabled(&self) -> impl Iterator<Item = Model> + '_ {
        Model::ALL.into_iter().filter(|model| match model {
            Model::Linear => self.linear,
            Model::Parabolic => self.parabolic
        })
    }
}

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct FitRequest {
    pub input:FitInput,
    #[serde(default)]
    pub models:ModelFlags,
    // single x to read every fitted model at
    #[serde(default)]
    pub readout_x:Option<f64>
}

impl FitRequest {
    pub fn from_json(text:&str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| FitError::Format { reason:format!("invalid request: {e}") })
    }

    pub fn load<P:AsRef<Path>>(path:P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FitError::Io {
            path:path.to_path_buf(),
            source
        })?;
        Self::from_json(&content)
    }
}

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct ModelReport {
    pub model:Model,
    pub coefficients:FitCoefficients,
    // fitted curve at the x's of the input points
    pub fitted:PointSet,
    pub quality:FitQuality,
    pub readout_y:Option<f64>
}

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct FitReport {
    pub points:PointSet,
    pub fits:Vec<ModelReport>
}

impl FitReport {
    pub fn fit(&self,model:Model) -> Option<&ModelReport> {
        self.fits.iter().find(|report| report.model == model)
    }
}

pub fn resolve_points(input:&FitInput) -> Result<PointSet> {
    match input {
        FitInput::Function { source, domain } => {
            let function = source.resolve()?;
            sample(&*function, domain)
        }
        FitInput::Points(points) => Ok(points.clone())
    }
}

fn fit_model(model:Model,points:&PointSet,readout_x:Option<f64>) -> Result<ModelReport> {
    let lsm = LsmCalculator::new(model);
    let coefficients = lsm.calculate(points)?;
    let fitted = PointSet::new(points.xs().to_vec(),lsm.recalculate(&coefficients, points.xs()))?;
    let quality = FitQuality::examine(points, &coefficients);
    let readout_y = readout_x.and_then(|x| lsm.recalculate(&coefficients, &[x]).first().copied());
    Ok(ModelReport { model, coefficients, fitted, quality, readout_y })
}

// any failure aborts the whole request, no partial report is returned
pub fn run(request:&FitRequest) -> Result<FitReport> {
    let points = resolve_points(&request.input)?;
    log::info!("fitting {} points",points.len());
    let fits = request.models.enabled()
        .map(|model| fit_model(model, &points, request.readout_x))
        .collect::<Result<Vec<_>>>()?;
    for report in &fits {
        log::info!("{} fit: {}",report.model,report.coefficients);
    }
    Ok(FitReport { points, fits })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::{FitInput,FitRequest,ModelFlags,run};
    use crate::data::PointSet;
    use crate::error::FitError;
    use crate::functions::FunctionSource;
    use crate::scientific_computing::least_squares::Model;
    use crate::scientific_computing::sampling::Domain;

    fn function_request(source:FunctionSource,domain:Domain) -> FitRequest {
        FitRequest {
            input:FitInput::Function { source, domain },
            models:ModelFlags::default(),
            readout_x:None
        }
    }

    #[test]
    fn test_sampled_builtin() {
        let request = function_request(
            FunctionSource::Builtin("sin_x".to_string()),
            Domain::new(0.0, PI, 2).unwrap()
        );
        let report = run(&request).unwrap();
        assert_eq!(report.points.xs(),&[0.0,1.571,3.142]);
        assert_eq!(report.fits.len(),2);
        let parabola = report.fit(Model::Parabolic).unwrap();
        // three points, the parabola passes through all of them
        assert_eq!(parabola.fitted.ys(),report.points.ys());
        assert!(parabola.quality.rss < 1e-9);
        assert_eq!(parabola.quality.rmse,None);
    }

    #[test]
    fn test_imported_points_with_readout() {
        let request = FitRequest {
            input:FitInput::Points(PointSet::new(vec![1.0,2.0,3.0],vec![2.0,4.0,6.0]).unwrap()),
            models:ModelFlags { linear:true, parabolic:false },
            readout_x:Some(5.0)
        };
        let report = run(&request).unwrap();
        assert_eq!(report.fits.len(),1);
        let line = report.fit(Model::Linear).unwrap();
        assert_eq!(line.readout_y,Some(10.0));
        assert!(report.fit(Model::Parabolic).is_none());
    }

    #[test]
    fn test_expression_request_from_json() {
        let request = FitRequest::from_json(r#"{
            "input": {"function": {
                "source": {"expression": "x^2 - 2*x"},
                "domain": {"start": -2.0, "end": 4.0, "step_count": 12}
            }},
            "readout_x": 10.0
        }"#).unwrap();
        assert_eq!(request.models,ModelFlags::default());
        let report = run(&request).unwrap();
        assert_eq!(report.points.len(),13);
        let parabola = report.fit(Model::Parabolic).unwrap();
        assert_eq!(parabola.readout_y,Some(80.0));
        assert!((parabola.quality.r_squared.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_points_request_from_json() {
        let request = FitRequest::from_json(
            r#"{"input": {"points": [[-1, 0, 1], [1, 0, 1]]}, "models": {"linear": false}}"#
        ).unwrap();
        let report = run(&request).unwrap();
        let parabola = report.fit(Model::Parabolic).unwrap();
        assert_eq!(parabola.fitted.ys(),&[1.0,0.0,1.0]);

        assert!(matches!(
            FitRequest::from_json(r#"{"input": {"points": [[1, 2], [1]]}}"#),
            Err(FitError::Format{..})
        ));
    }

    #[test]
    fn test_errors_propagate() {
        let bad_domain = function_request(
            FunctionSource::Builtin("sin_x".to_string()),
            Domain { start:0.0, end:1.0, step_count:0 }
        );
        assert!(matches!(run(&bad_domain),Err(FitError::InvalidDomain{..})));

        let undefined = function_request(
            FunctionSource::Expression("1/x".to_string()),
            Domain::new(-1.0, 1.0, 2).unwrap()
        );
        assert!(matches!(run(&undefined),Err(FitError::FunctionEvaluation{x}) if x == 0.0));

        let singular = FitRequest {
            input:FitInput::Points(PointSet::new(vec![2.0,2.0],vec![1.0,5.0]).unwrap()),
            models:ModelFlags::default(),
            readout_x:None
        };
        assert!(matches!(run(&singular),Err(FitError::SingularSystem{model:Model::Linear,..})));

        let unknown = function_request(
            FunctionSource::Builtin("cos_x".to_string()),
            Domain::new(0.0, 1.0, 2).unwrap()
        );
        assert!(matches!(run(&unknown),Err(FitError::UnknownFunction{..})));
    }
}
