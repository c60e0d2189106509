use serde::Serialize;

use crate::data::PointSet;
use super::least_squares::FitCoefficients;

// goodness of fit of one model against the points it was fitted to
#[derive(Clone,Copy,Debug,PartialEq,Serialize)]
pub struct FitQuality {
    // residual sum of squares
    pub rss:f64,
    // sqrt(rss/(n - coefficient count)), none without degrees of freedom left
    pub rmse:Option<f64>,
    // 1 - rss/tss, none when every y is the same
    pub r_squared:Option<f64>
}

impl FitQuality {
    pub fn examine(points:&PointSet,coefficients:&FitCoefficients) -> Self {
        let n = points.len() as f64;
        let y_mean = points.ys().iter().sum::<f64>()/n;

        let mut rss = 0.0;
        let mut tss = 0.0;
        for (x,y) in points.iter() {
            rss += (y - coefficients.evaluate(x)).powi(2);
            tss += (y - y_mean).powi(2);
        }

        let dof = points.len().saturating_sub(coefficients.values().len());
        let rmse = (dof > 0).then(|| (rss/dof as f64).sqrt());
        let r_squared = (tss > 0.0).then(|| 1.0 - rss/tss);
        Self { rss, rmse, r_squared }
    }
}
