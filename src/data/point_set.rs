use serde::{Deserialize,Serialize};

use crate::error::{FitError,Result};

// externally supplied point data needs at least this many points
pub const MIN_IMPORTED_POINTS:usize = 2;

pub type RawPoints = (Vec<f64>,Vec<f64>);

// index aligned samples, point i is (xs[i],ys[i])
// serialized as [[x0,x1,...],[y0,y1,...]]
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(try_from = "RawPoints", into = "RawPoints")]
pub struct PointSet {
    //xs.len() == ys.len() >= 1, every value finite
    xs:Vec<f64>,
    ys:Vec<f64>
}

impl PointSet {
    pub fn new(xs:Vec<f64>,ys:Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(FitError::Format {
                reason:format!("x and y sequences differ in length ({} vs {})",xs.len(),ys.len())
            })
        }
        if xs.is_empty() {
            return Err(FitError::Format { reason:"point set is empty".to_string() })
        }
        if let Some(i) = xs.iter().zip(&ys).position(|(x,y)| !x.is_finite() || !y.is_finite()) {
            return Err(FitError::Format {
                reason:format!("point {i} ({}, {}) is not finite",xs[i],ys[i])
            })
        }
        Ok(Self { xs, ys })
    }

    // validation for data coming from outside, files or requests
    pub fn imported(xs:Vec<f64>,ys:Vec<f64>) -> Result<Self> {
        if xs.len() == ys.len() && xs.len() < MIN_IMPORTED_POINTS {
            return Err(FitError::Format {
                reason:format!("need at least {MIN_IMPORTED_POINTS} points, got {}",xs.len())
            })
        }
        Self::new(xs,ys)
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64,f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    pub fn into_parts(self) -> RawPoints {
        (self.xs,self.ys)
    }
}

impl TryFrom<RawPoints> for PointSet {
    type Error = FitError;
    fn try_from((xs,ys):RawPoints) -> Result<Self> {
        Self::imported(xs,ys)
    }
}

impl From<PointSet> for RawPoints {
    fn from(value:PointSet) -> Self {
        value.into_parts()
    }
}

#[cfg(test)]
mod tests {
    use super::PointSet;
    use crate::error::FitError;

    #[test]
    fn test_new_keeps_alignment() {
        let points = PointSet::new(vec![1.0,2.0,3.0],vec![2.0,4.0,6.0]).unwrap();
        assert_eq!(points.len(),3);
        assert_eq!(points.iter().collect::<Vec<_>>(),vec![(1.0,2.0),(2.0,4.0),(3.0,6.0)]);
    }

    #[test]
    fn test_single_point_allowed_but_not_imported() {
        assert!(PointSet::new(vec![1.0],vec![1.0]).is_ok());
        assert!(matches!(PointSet::imported(vec![1.0],vec![1.0]),Err(FitError::Format{..})));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(PointSet::new(vec![1.0,2.0],vec![1.0]),Err(FitError::Format{..})));
        assert!(matches!(PointSet::new(vec![],vec![]),Err(FitError::Format{..})));
        assert!(matches!(PointSet::new(vec![1.0,f64::NAN],vec![1.0,2.0]),Err(FitError::Format{..})));
        assert!(matches!(PointSet::new(vec![1.0,2.0],vec![f64::INFINITY,2.0]),Err(FitError::Format{..})));
    }

    #[test]
    fn test_serde_shape() {
        let points = PointSet::new(vec![0.0,1.5],vec![-1.0,2.0]).unwrap();
        let json = serde_json::to_string(&points).unwrap();
        assert_eq!(json,"[[0.0,1.5],[-1.0,2.0]]");
        let back:PointSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back,points);
        assert!(serde_json::from_str::<PointSet>("[[1.0],[2.0]]").is_err());
    }
}
