use thiserror::Error;

// a pivot is treated as zero once its magnitude drops to
// PIVOT_EPS times the largest entry of the coefficient matrix
pub const PIVOT_EPS:f64 = 1e-12;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum MatrixError {
    #[error("right hand side has {len} entries, but the matrix has {row_count} rows")]
    RhsLenUnmatch{row_count:usize,len:usize},
    #[error("Matrix size is:{matrix_size:?},but index at {accessed_index:?} was accessed")]
    IndexOutOfBounds{matrix_size:(usize,usize),accessed_index:(usize,usize)},
    #[error("Matrix have {row_count} rows ,but row at {accessed_row} was accessed")]
    RowOutOfBounds{row_count:usize,accessed_row:usize},
    #[error("Matrix have {col_count} cols ,but col at {accessed_col} was accessed")]
    ColOutOfBounds{col_count:usize,accessed_col:usize},
    #[error("solving requires ({row},{col}) to be square, which isn't")]
    NonSquareError{row:usize,col:usize},
    #[error("Matrix1 size is:{matrix_size1:?},matrix2 size is {matrix_size2:?}, there's mismatch")]
    DimensionMismatch{matrix_size1:(usize,usize),matrix_size2:(usize,usize)},
    #[error("entry {value} at flat index {index} is not finite")]
    NonFiniteError{index:usize,value:f64},
    #[error("pivot {pivot:e} in column {col} is within tolerance {tolerance:e}, matrix is singular")]
    SingularError{col:usize,pivot:f64,tolerance:f64}
}

type Result<T> = std::result::Result<T,MatrixError>;

// A double precision matrix, row major order
// which means rows are stored continuously
#[derive(Clone,Debug,PartialEq)]
pub struct Matrix {
    row_count:usize,
    col_count:usize,
    //row*col must equal elements.len()
    elements:Vec<f64>
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            row_count:0,
            col_count:0,
            elements:vec![]
        }
    }
}

//public implementations
impl Matrix {
    // element (i,j) = f(i,j)
    pub fn from_fn<F:FnMut(usize,usize) -> f64>(row:usize,col:usize,mut f:F) -> Self {
        if row*col == 0 {
            return Self::default()
        }
        let mut elements = Vec::with_capacity(row*col);
        for index in 0..row*col {
            elements.push(f(index/col,index%col));
        }
        Self { row_count:row, col_count:col, elements }
    }
    pub fn get(&self,row:usize,col:usize) -> Result<f64> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        if row >= self.row_count || col >= self.col_count {
            return Err(MatrixError::IndexOutOfBounds {
                matrix_size:(self.row_count,self.col_count),
                accessed_index:(row,col)
            })
        }
        Ok(self.elements[row*self.col_count + col])
    }
    pub fn is_empty(&self) -> bool {
        self.col_count == 0 || self.row_count == 0 || self.elements.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.row_count == self.col_count
    }

    pub fn dimension(&self) -> (usize,usize) {
        if self.is_empty() {return (0,0)}
        (self.row_count,self.col_count)
    }

    pub fn max_abs(&self) -> f64 {
        self.elements.iter().fold(0.0,|acc,n| acc.max(n.abs()))
    }

    // solves self * a = rhs by gaussian elimination with partial pivoting
    // on the augmented matrix [self | rhs], then back substitution
    pub fn solve(&self,rhs:&[f64]) -> Result<Vec<f64>> {
        if !self.is_square() {
            return Err(MatrixError::NonSquareError { row: self.row_count, col: self.col_count })
        }
        if rhs.len() != self.row_count {
            return Err(MatrixError::RhsLenUnmatch { row_count: self.row_count, len: rhs.len() })
        }
        if self.is_empty() {
            return Ok(vec![])
        }
        if let Some((index,value)) = self.elements.iter().chain(rhs)
            .enumerate()
            .find(|(_,n)| !n.is_finite()) {
            return Err(MatrixError::NonFiniteError { index, value:*value })
        }
        let tolerance = PIVOT_EPS*self.max_abs();
        let mut augmented = self.augment(rhs);
        augmented.forward_elimination(self.row_count,tolerance)?;
        augmented.back_substitution()
    }
}

//private implementations
impl Matrix {
    fn augment(&self,rhs:&[f64]) -> Self {
        debug_assert_eq!(rhs.len(),self.row_count);
        let n = self.col_count;
        Self::from_fn(self.row_count, n+1, |i,j| {
            if j < n {self.elements[i*n + j]} else {rhs[i]}
        })
    }

    fn row_exchange(&mut self,row1:usize,row2:usize,offset:usize) -> Result<()> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        let row_ofb = | row | MatrixError::RowOutOfBounds { row_count: self.row_count, accessed_row: row };
        if row1 >= self.row_count {
            return Err(row_ofb(row1))
        }
        if row2 >= self.row_count {
            return Err(row_ofb(row2))
        }
        if offset >= self.col_count {
            return Err(MatrixError::ColOutOfBounds { col_count: self.col_count, accessed_col: offset })
        }
        if row1 == row2 {
            return Ok(());
        }

        let cols = self.col_count;
        let (low,high) = (row1.min(row2),row1.max(row2));
        // low row lives entirely in head, high row starts tail
        let (head,tail) = self.elements.split_at_mut(high*cols);
        head[low*cols + offset..(low+1)*cols].swap_with_slice(&mut tail[offset..cols]);
        Ok(())
    }

    // dest_row -= coefficient*src_row
    fn row_elimination(&mut self, src_row:usize,dest_row:usize,offset:usize, coefficient:f64) -> Result<()>{
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        let row_ofb = | row | MatrixError::RowOutOfBounds { row_count: self.row_count, accessed_row: row };
        if src_row >= self.row_count {
            return Err(row_ofb(src_row))
        }
        if dest_row >= self.row_count {
            return Err(row_ofb(dest_row))
        }
        if offset >= self.col_count {
            return Err(MatrixError::ColOutOfBounds { col_count: self.col_count, accessed_col: offset })
        }

        let cols = self.col_count;
        if src_row == dest_row {
            for i in &mut self.elements[src_row*cols + offset..(src_row+1)*cols] {
                (*i)*=1.0-coefficient;
            }
            return Ok(())
        }

        let (src,dest):(&[f64],&mut [f64]) = if src_row < dest_row {
            let (head,tail) = self.elements.split_at_mut(dest_row*cols);
            (&head[src_row*cols + offset..(src_row+1)*cols],&mut tail[offset..cols])
        } else {
            let (head,tail) = self.elements.split_at_mut(src_row*cols);
            (&tail[offset..cols],&mut head[dest_row*cols + offset..(dest_row+1)*cols])
        };

        for (src_i,dest_i) in src.iter().zip(dest.iter_mut()) {
            *dest_i -= coefficient*src_i;
        }
        Ok(())
    }

    // select pivot from (pivot_row,pivot_col) downwards to (row_max,pivot_col)
    // column is unchanged
    fn select_pivot_row(&self,pivot_row:usize,pivot_col:usize) -> Result<(usize,f64)> {
        if pivot_row >= self.row_count {
            return Err(MatrixError::RowOutOfBounds { row_count: self.row_count, accessed_row: pivot_row })
        }
        if pivot_col >= self.col_count {
            return Err(MatrixError::ColOutOfBounds { col_count: self.col_count, accessed_col: pivot_col })
        }

        let mut pivot = self.get(pivot_row, pivot_col)?;
        let mut pivot_row = pivot_row;
        for next_row in pivot_row+1..self.row_count {
            let candidate = self.get(next_row, pivot_col)?;
            if candidate.abs() > pivot.abs() {
                pivot = candidate;
                pivot_row = next_row;
            }
        }
        Ok((pivot_row,pivot))
    }

    // reduces the first pivot_cols columns to upper triangular form,
    // trailing columns (the right hand side) ride along
    fn forward_elimination(&mut self,pivot_cols:usize,tolerance:f64) -> Result<()> {
        debug_assert!(pivot_cols <= self.row_count.min(self.col_count));
        for src_row in 0..pivot_cols {
            let (pivot_row,pivot) = self.select_pivot_row(src_row, src_row)?;
            if !(pivot.abs() > tolerance) {
                return Err(MatrixError::SingularError { col: src_row, pivot, tolerance })
            }
            self.row_exchange(src_row, pivot_row, src_row)?;
            for dest_row in src_row+1..self.row_count {
                let coef = self.get(dest_row, src_row)?/pivot;
                if coef == 0.0 {continue}
                self.row_elimination(src_row, dest_row, src_row, coef)?;
            }
        }
        Ok(())
    }

    // expects an upper triangular n*(n+1) augmented matrix
    fn back_substitution(&self) -> Result<Vec<f64>> {
        let n = self.row_count;
        if self.col_count != n+1 {
            return Err(MatrixError::DimensionMismatch {
                matrix_size1: self.dimension(),
                matrix_size2: (n,n+1) })
        }
        let mut solution = vec![0.0;n];
        for row in (0..n).rev() {
            let mut acc = self.get(row, n)?;
            for col in row+1..n {
                acc -= self.get(row, col)?*solution[col];
            }
            solution[row] = acc/self.get(row, row)?;
        }
        Ok(solution)
    }
}
