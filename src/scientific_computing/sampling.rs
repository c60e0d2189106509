use serde::{Deserialize,Serialize};

use crate::data::PointSet;
use crate::error::{FitError,Result};

// sampled and recalculated values are rounded to this many decimals
pub const ROUND_DIGITS:i32 = 3;

// largest step count a domain may ask for, every point is held in memory
pub const MAX_STEP_COUNT:i64 = 10_000_000;

// magnitudes this large carry no digits below 10^-ROUND_DIGITS
// and are returned as they are, which also keeps value*scale finite
pub fn round_to_precision(value:f64) -> f64 {
    let scale = 10f64.powi(ROUND_DIGITS);
    if !(value.abs() < 2f64.powi(52)/scale) {
        return value
    }
    (value*scale).round()/scale
}

// closed interval [start,end] cut into step_count equal steps
#[derive(Clone,Copy,Debug,PartialEq,Serialize,Deserialize)]
pub struct Domain {
    pub start:f64,
    pub end:f64,
    // signed so that a bad request still deserializes and gets reported
    pub step_count:i64
}

impl Domain {
    pub fn new(start:f64,end:f64,step_count:i64) -> Result<Self> {
        let domain = Self { start, end, step_count };
        domain.validate()?;
        Ok(domain)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason| FitError::InvalidDomain {
            start:self.start,
            end:self.end,
            step_count:self.step_count,
            reason
        };
        if self.step_count <= 0 {
            return Err(invalid("step count must be positive"))
        }
        if self.step_count > MAX_STEP_COUNT {
            return Err(invalid("step count is too large"))
        }
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(invalid("bounds must be finite"))
        }
        if self.end <= self.start {
            return Err(invalid("end must be greater than start"))
        }
        if !self.step().is_finite() {
            return Err(invalid("interval too wide"))
        }
        Ok(())
    }

    pub fn step(&self) -> f64 {
        (self.end - self.start).abs()/self.step_count as f64
    }

    pub fn point_count(&self) -> usize {
        self.step_count.max(0) as usize + 1
    }
}

// x_i = start + i*step for i in 0..=step_count, y_i = f(x_i), both rounded;
// the first x where f is not finite aborts the pass
pub fn sample<F:Fn(f64) -> f64 + ?Sized>(f:&F,domain:&Domain) -> Result<PointSet> {
    domain.validate()?;
    let step = domain.step();
    let mut xs = Vec::with_capacity(domain.point_count());
    let mut ys = Vec::with_capacity(domain.point_count());
    for i in 0..domain.point_count() {
        let x = domain.start + i as f64*step;
        let y = f(x);
        if !y.is_finite() {
            log::debug!("sampling aborted, f({x}) = {y}");
            return Err(FitError::FunctionEvaluation { x })
        }
        xs.push(round_to_precision(x));
        ys.push(round_to_precision(y));
    }
    log::debug!("sampled {} points on [{}, {}]",xs.len(),domain.start,domain.end);
    PointSet::new(xs,ys)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use rand::Rng;

    use super::{Domain,MAX_STEP_COUNT,round_to_precision,sample};
    use crate::error::FitError;

    #[test]
    fn test_round() {
        assert_eq!(round_to_precision(1.23449),1.234);
        assert_eq!(round_to_precision(-2.0006),-2.001);
        assert_eq!(round_to_precision(PI),3.142);
        assert_eq!(round_to_precision(5.0),5.0);
        assert_eq!(round_to_precision(1e306),1e306);
        assert_eq!(round_to_precision(-f64::MAX),-f64::MAX);
        assert_eq!(round_to_precision(1e13 + 0.5),1e13 + 0.5);
        assert!(round_to_precision(f64::NAN).is_nan());
    }

    #[test]
    fn test_huge_values_stay_finite() {
        let points = sample(&f64::exp,&Domain::new(700.0, 708.0, 8).unwrap()).unwrap();
        assert_eq!(points.len(),9);
        assert_eq!(points.ys()[3],703f64.exp());
        assert!(points.ys().iter().all(|y| y.is_finite()));
    }

    #[test]
    fn test_sin_half_period() {
        let points = sample(&f64::sin,&Domain::new(0.0, PI, 2).unwrap()).unwrap();
        assert_eq!(points.xs(),&[0.0,1.571,3.142]);
        assert_eq!(points.ys(),&[0.0,1.0,0.0]);
    }

    #[test]
    fn test_point_count_and_endpoints() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let start = rng.random_range(-50.0..50.0);
            let end = start + rng.random_range(0.01..100.0);
            let steps = rng.random_range(1..500);
            let points = sample(&|x:f64| x*x,&Domain::new(start, end, steps).unwrap()).unwrap();
            assert_eq!(points.len(),steps as usize + 1);
            assert!((points.xs()[0] - start).abs() <= 5e-4 + 1e-12);
            assert!((points.xs()[steps as usize] - end).abs() <= 5e-4 + 1e-9);
        }
    }

    #[test]
    fn test_x_is_monotonic() {
        let points = sample(&f64::exp,&Domain::new(-1.0, 1.0, 40).unwrap()).unwrap();
        assert!(points.xs().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_invalid_domain() {
        for (start,end,steps) in [
            (0.0,1.0,0),
            (0.0,1.0,-3),
            (1.0,1.0,10),
            (2.0,1.0,10),
            (f64::NAN,1.0,10),
            (0.0,f64::INFINITY,10),
            (0.0,1.0,MAX_STEP_COUNT + 1),
            (0.0,1.0,i64::MAX),
            (-1e308,1e308,10),
            (-f64::MAX,f64::MAX,1),
        ] {
            assert!(matches!(Domain::new(start, end, steps),Err(FitError::InvalidDomain{..})));
            let unchecked = Domain { start, end, step_count:steps };
            assert!(matches!(sample(&f64::sin,&unchecked),Err(FitError::InvalidDomain{..})));
        }
        assert!(Domain::new(0.0, 1.0, MAX_STEP_COUNT).is_ok());
        assert!(Domain::new(-1e307, 1e307, 4).is_ok());
    }

    #[test]
    fn test_undefined_point_aborts() {
        let domain = Domain::new(-2.0, 2.0, 4).unwrap();
        let err = sample(&|x:f64| 1.0/x,&domain).unwrap_err();
        assert!(matches!(err,FitError::FunctionEvaluation{x} if x == 0.0));
        let err = sample(&f64::ln,&domain).unwrap_err();
        assert!(matches!(err,FitError::FunctionEvaluation{x} if x == -2.0));
    }
}
