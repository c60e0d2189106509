// bulk point files: a json array holding two equally long
// arrays, [[x0,x1,...],[y0,y1,...]], with at least two points
use std::path::Path;

use super::point_set::{PointSet,RawPoints};
use crate::error::{FitError,Result};

pub fn parse_points(json:&str) -> Result<PointSet> {
    let (xs,ys):RawPoints = serde_json::from_str(json).map_err(|e| FitError::Format {
        reason:format!("expected two lists of numbers: {e}")
    })?;
    PointSet::imported(xs,ys)
}

pub fn load_points<P:AsRef<Path>>(path:P) -> Result<PointSet> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| FitError::Io {
        path:path.to_path_buf(),
        source
    })?;
    let points = parse_points(&content)?;
    log::info!("loaded {} points from {}",points.len(),path.display());
    Ok(points)
}

pub fn points_to_json(points:&PointSet) -> Result<String> {
    serde_json::to_string(points).map_err(|e| FitError::Format { reason:e.to_string() })
}

pub fn save_points<P:AsRef<Path>>(path:P,points:&PointSet) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path,points_to_json(points)?).map_err(|source| FitError::Io {
        path:path.to_path_buf(),
        source
    })?;
    log::info!("saved {} points to {}",points.len(),path.display());
    Ok(())
}
