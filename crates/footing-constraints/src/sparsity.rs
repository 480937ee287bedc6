//! Compressed-column sparsity patterns.
//!
//! Solvers query the structural nonzeros of every function input, output
//! and Jacobian once, then exchange only nonzero values. Patterns are
//! stored column-major: `colind[j]..colind[j + 1]` indexes into `row` for
//! the entries of column `j`, with rows ascending inside a column.

use clarabel::algebra::CscMatrix;
use nalgebra::DMatrix;

/// Structural nonzero pattern of an `nrows × ncols` matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sparsity {
    nrows: usize,
    ncols: usize,
    colind: Vec<usize>,
    row: Vec<usize>,
}

impl Sparsity {
    /// Pattern with every entry structurally nonzero.
    pub fn dense(nrows: usize, ncols: usize) -> Self {
        let colind = (0..=ncols).map(|j| j * nrows).collect();
        let row = (0..ncols).flat_map(|_| 0..nrows).collect();
        Self {
            nrows,
            ncols,
            colind,
            row,
        }
    }

    /// Dense column vector of length `n`.
    pub fn dense_column(n: usize) -> Self {
        Self::dense(n, 1)
    }

    /// The `0 × 0` pattern of an empty block.
    pub fn empty() -> Self {
        Self::dense(0, 0)
    }

    /// Build from `(row, col)` pairs. Order and duplicates do not matter.
    ///
    /// # Panics
    /// If any pair lies outside `nrows × ncols`.
    pub fn from_triplets(nrows: usize, ncols: usize, entries: &[(usize, usize)]) -> Self {
        let mut sorted: Vec<(usize, usize)> = entries
            .iter()
            .map(|&(r, c)| {
                assert!(r < nrows && c < ncols, "entry ({r}, {c}) outside {nrows}x{ncols}");
                (c, r)
            })
            .collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut colind = vec![0usize; ncols + 1];
        for &(c, _) in &sorted {
            colind[c + 1] += 1;
        }
        for j in 0..ncols {
            colind[j + 1] += colind[j];
        }
        let row = sorted.into_iter().map(|(_, r)| r).collect();

        Self {
            nrows,
            ncols,
            colind,
            row,
        }
    }

    pub const fn nrows(&self) -> usize {
        self.nrows
    }

    pub const fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of structural nonzeros.
    pub fn nnz(&self) -> usize {
        self.row.len()
    }

    /// Column pointer array (`ncols + 1` entries).
    pub fn colind(&self) -> &[usize] {
        &self.colind
    }

    /// Row index of each nonzero.
    pub fn row(&self) -> &[usize] {
        &self.row
    }

    pub fn is_dense(&self) -> bool {
        self.nnz() == self.nrows * self.ncols
    }

    /// `(row, col)` of every nonzero, in storage order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.ncols).flat_map(move |j| {
            self.row[self.colind[j]..self.colind[j + 1]]
                .iter()
                .map(move |&r| (r, j))
        })
    }

    /// Storage index of entry `(r, c)`, if it is a structural nonzero.
    pub fn position(&self, r: usize, c: usize) -> Option<usize> {
        if c >= self.ncols {
            return None;
        }
        let start = self.colind[c];
        let column = &self.row[start..self.colind[c + 1]];
        column.binary_search(&r).ok().map(|k| start + k)
    }

    /// Structural nonzeros in each row.
    pub fn row_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.nrows];
        for &r in &self.row {
            counts[r] += 1;
        }
        counts
    }

    /// Flat `[nrows, ncols, colind.., row..]` encoding used by code-generated
    /// solver interfaces.
    pub fn to_compressed(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(2 + self.colind.len() + self.row.len());
        out.push(self.nrows);
        out.push(self.ncols);
        out.extend_from_slice(&self.colind);
        out.extend_from_slice(&self.row);
        out
    }

    /// Inverse of [`Self::to_compressed`]. Returns `None` on a malformed encoding.
    pub fn from_compressed(data: &[usize]) -> Option<Self> {
        let (&nrows, rest) = data.split_first()?;
        let (&ncols, rest) = rest.split_first()?;
        if rest.len() < ncols + 1 {
            return None;
        }
        let (colind, row) = rest.split_at(ncols + 1);
        let monotone = colind.windows(2).all(|w| w[0] <= w[1]);
        if colind[0] != 0 || !monotone || colind[ncols] != row.len() {
            return None;
        }
        if row.iter().any(|&r| r >= nrows) {
            return None;
        }
        Some(Self {
            nrows,
            ncols,
            colind: colind.to_vec(),
            row: row.to_vec(),
        })
    }

    /// Scatter nonzero values (in storage order) into a dense matrix.
    ///
    /// # Panics
    /// If `values.len() != self.nnz()`.
    pub fn to_dense(&self, values: &[f64]) -> DMatrix<f64> {
        assert_eq!(values.len(), self.nnz(), "value count must match nonzeros");
        let mut m = DMatrix::zeros(self.nrows, self.ncols);
        for ((r, c), &v) in self.entries().zip(values) {
            m[(r, c)] = v;
        }
        m
    }

    /// Pair nonzero values (in storage order) with this pattern as a Clarabel matrix.
    ///
    /// Structural zeros are kept so the solver sees a fixed pattern across calls.
    ///
    /// # Panics
    /// If `values.len() != self.nnz()`.
    pub fn to_csc(&self, values: &[f64]) -> CscMatrix<f64> {
        assert_eq!(values.len(), self.nnz(), "value count must match nonzeros");
        CscMatrix::new(
            self.nrows,
            self.ncols,
            self.colind.clone(),
            self.row.clone(),
            values.to_vec(),
        )
    }
}
