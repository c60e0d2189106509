use std::fmt::Display;

use serde::{Deserialize,Serialize};

use crate::data::PointSet;
use crate::error::{FitError,Result};
use crate::linear_algebra::matrix::{Matrix,MatrixError};
use super::sampling::round_to_precision;

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    Linear,
    Parabolic
}

impl Model {
    pub const ALL:[Model;2] = [Model::Linear,Model::Parabolic];

    pub fn degree(self) -> usize {
        match self {
            Model::Linear => 1,
            Model::Parabolic => 2
        }
    }

    pub fn coefficient_count(self) -> usize {
        self.degree() + 1
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::Linear => write!(f,"linear"),
            Model::Parabolic => write!(f,"parabolic")
        }
    }
}

// affine map t = (x - center)/spread putting the input x's into [-1,1],
// keeps the normal equations conditioned independently of where x lives
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Scaling {
    center:f64,
    spread:f64
}

impl Scaling {
    pub const IDENTITY:Scaling = Scaling { center:0.0, spread:1.0 };

    pub fn of(points:&PointSet) -> Self {
        let (min,max) = points.xs().iter()
            .fold((f64::INFINITY,f64::NEG_INFINITY),|(lo,hi),x| (lo.min(*x),hi.max(*x)));
        if !(min <= max) {
            return Self::IDENTITY
        }
        // halves first, max - min may overflow
        let center = min/2.0 + max/2.0;
        let spread = max/2.0 - min/2.0;
        // all x equal, stays singular below
        if !(spread > 0.0) {
            return Self { center, spread:1.0 }
        }
        Self { center, spread }
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    pub fn apply(&self,x:f64) -> f64 {
        (x - self.center)/self.spread
    }

    // coefficients of sum b_k*t^k rewritten as coefficients in x
    pub fn unscale(&self,scaled:&[f64]) -> Vec<f64> {
        let shift = -self.center/self.spread;
        let slope = 1.0/self.spread;
        let mut values = vec![0.0;scaled.len()];
        // horner over polynomials: values = values*(slope*x + shift) + b_k
        for (step,b) in scaled.iter().rev().enumerate() {
            for k in (0..=step).rev() {
                let carried = if k > 0 {values[k-1]*slope} else {0.0};
                values[k] = values[k]*shift + carried;
            }
            values[0] += b;
        }
        values
    }
}

// x_sums[k] = sum of t^k for k in 0..=2*degree
// xy_sums[k] = sum of t^k*y for k in 0..=degree
// with t the scaled x
#[derive(Clone,Debug,PartialEq)]
pub struct PowerSums {
    degree:usize,
    x_sums:Vec<f64>,
    xy_sums:Vec<f64>
}

impl PowerSums {
    pub fn accumulate(points:&PointSet,degree:usize,scaling:&Scaling) -> Self {
        let mut x_sums = vec![0.0;2*degree + 1];
        let mut xy_sums = vec![0.0;degree + 1];
        for (x,y) in points.iter() {
            let t = scaling.apply(x);
            let mut power = 1.0;
            for (k,sum) in x_sums.iter_mut().enumerate() {
                *sum += power;
                if k <= degree {
                    xy_sums[k] += power*y;
                }
                power *= t;
            }
        }
        Self { degree, x_sums, xy_sums }
    }

    pub fn x_sums(&self) -> &[f64] {
        &self.x_sums
    }

    pub fn xy_sums(&self) -> &[f64] {
        &self.xy_sums
    }

    // symmetric (degree+1)*(degree+1) matrix, entry (i,j) = x_sums[i+j]
    pub fn normal_matrix(&self) -> Matrix {
        let size = self.degree + 1;
        Matrix::from_fn(size, size, |i,j| self.x_sums[i+j])
    }
}

// a0 + a1*x + a2*x^2 ..., values[k] is the coefficient of x^k
#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct FitCoefficients {
    model:Model,
    values:Vec<f64>
}

impl FitCoefficients {
    pub fn linear(a0:f64,a1:f64) -> Self {
        Self { model:Model::Linear, values:vec![a0,a1] }
    }

    pub fn parabolic(a0:f64,a1:f64,a2:f64) -> Self {
        Self { model:Model::Parabolic, values:vec![a0,a1,a2] }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    // horner, unrounded
    pub fn evaluate(&self,x:f64) -> f64 {
        self.values.iter().rev().fold(0.0,|acc,a| acc*x + a)
    }
}

impl Display for FitCoefficients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"y = {}",self.values[0])?;
        for (k,a) in self.values.iter().enumerate().skip(1) {
            let sign = if a.is_sign_negative() {'-'} else {'+'};
            write!(f," {sign} {}*x",a.abs())?;
            if k > 1 {
                write!(f,"^{k}")?;
            }
        }
        Ok(())
    }
}

// ordinary least squares for a polynomial of fixed degree,
// solved through the normal equations built from power sums
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct LsmCalculator {
    model:Model
}

impl LsmCalculator {
    pub fn new(model:Model) -> Self {
        Self { model }
    }

    pub fn linear() -> Self {
        Self::new(Model::Linear)
    }

    pub fn parabolic() -> Self {
        Self::new(Model::Parabolic)
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn calculate(&self,points:&PointSet) -> Result<FitCoefficients> {
        let scaling = Scaling::of(points);
        let sums = PowerSums::accumulate(points, self.model.degree(), &scaling);
        log::debug!("{} fit over {} points, {scaling:?}, t sums {:?}, ty sums {:?}",
            self.model,points.len(),sums.x_sums(),sums.xy_sums());

        let scaled = sums.normal_matrix().solve(sums.xy_sums()).map_err(|e| match e {
            MatrixError::SingularError{..} => {
                log::warn!("{} fit rejected: {e}",self.model);
                FitError::SingularSystem { model:self.model, source:e }
            }
            other => FitError::Matrix(other)
        })?;
        debug_assert_eq!(scaled.len(),self.model.coefficient_count());

        let values = scaling.unscale(&scaled);
        let coefficients = FitCoefficients { model:self.model, values };
        log::debug!("{} fit: {coefficients}",self.model);
        Ok(coefficients)
    }

    // fitted polynomial at each x, rounded to 3 decimals
    pub fn recalculate(&self,coefficients:&FitCoefficients,x_values:&[f64]) -> Vec<f64> {
        debug_assert_eq!(coefficients.model(),self.model,"coefficients of another model");
        x_values.iter().map(|x| round_to_precision(coefficients.evaluate(*x))).collect()
    }

    // the fitted curve sampled at the x positions of the input
    pub fn find_lsm_points(&self,points:&PointSet) -> Result<PointSet> {
        let coefficients = self.calculate(points)?;
        let ys = self.recalculate(&coefficients, points.xs());
        PointSet::new(points.xs().to_vec(),ys)
    }
}
