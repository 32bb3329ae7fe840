//! Abundance tables: the lookup contract used by the evaluator and a sparse
//! in-memory implementation.

use crate::error::{EvalError, Result};
use sprs::{CsMat, TriMat};
use std::collections::HashMap;

/// Read-only view of an abundance table.
///
/// Observations are the rows (OTUs, gene families, traits); each row holds
/// one value per sample. Parsing tables from disk is left to the caller.
pub trait AbundanceTable {
    /// Identifiers of every observation in the table.
    fn observation_ids(&self) -> Vec<&str>;

    /// Per-sample values for one observation, or `None` if the id is unknown.
    fn observation_vector(&self, id: &str) -> Option<Vec<f64>>;
}

/// A sparse abundance table storing observation values across samples.
///
/// Rows represent observations, columns represent samples.
/// Uses CSR (Compressed Sparse Row) format for efficient row-wise access.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    /// Sparse matrix in CSR format (observations × samples)
    data: CsMat<f64>,
    /// Observation identifiers (row names)
    observation_ids: Vec<String>,
    /// Sample identifiers (column names)
    sample_ids: Vec<String>,
    /// Row index for each observation id
    index: HashMap<String, usize>,
}

impl ObservationTable {
    /// Create a new table from a sparse matrix and identifiers.
    pub fn new(
        data: CsMat<f64>,
        observation_ids: Vec<String>,
        sample_ids: Vec<String>,
    ) -> Result<Self> {
        let (nrows, ncols) = data.shape();
        if nrows != observation_ids.len() {
            return Err(EvalError::DimensionMismatch {
                expected: nrows,
                actual: observation_ids.len(),
            });
        }
        if ncols != sample_ids.len() {
            return Err(EvalError::DimensionMismatch {
                expected: ncols,
                actual: sample_ids.len(),
            });
        }

        let mut index = HashMap::with_capacity(nrows);
        for (row, id) in observation_ids.iter().enumerate() {
            if index.insert(id.clone(), row).is_some() {
                return Err(EvalError::InvalidArgument(format!(
                    "duplicate observation id '{}'",
                    id
                )));
            }
        }

        Ok(Self {
            data,
            observation_ids,
            sample_ids,
            index,
        })
    }

    /// Build a table from dense rows, one per observation.
    ///
    /// Every row must have one value per sample. Zeros are not stored.
    pub fn from_rows(
        observation_ids: Vec<String>,
        sample_ids: Vec<String>,
        rows: &[Vec<f64>],
    ) -> Result<Self> {
        if rows.len() != observation_ids.len() {
            return Err(EvalError::DimensionMismatch {
                expected: observation_ids.len(),
                actual: rows.len(),
            });
        }

        let n_samples = sample_ids.len();
        let mut tri_mat = TriMat::new((rows.len(), n_samples));
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n_samples {
                return Err(EvalError::DimensionMismatch {
                    expected: n_samples,
                    actual: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value != 0.0 {
                    tri_mat.add_triplet(row, col, value);
                }
            }
        }

        Self::new(tri_mat.to_csr(), observation_ids, sample_ids)
    }

    /// Number of samples (columns).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.cols()
    }

    /// Row index of an observation id.
    pub fn row_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Dense values of one row, zeros filled in.
    fn row_dense(&self, row: usize) -> Vec<f64> {
        let mut dense = vec![0.0; self.n_samples()];
        if let Some(row_vec) = self.data.outer_view(row) {
            for (col, &val) in row_vec.iter() {
                dense[col] = val;
            }
        }
        dense
    }

    /// Subset the table to the given observation ids, in the given order.
    pub fn subset_observations(&self, ids: &[&str]) -> Result<Self> {
        let mut tri_mat = TriMat::new((ids.len(), self.n_samples()));
        let mut new_ids = Vec::with_capacity(ids.len());

        for (new_row, id) in ids.iter().enumerate() {
            let old_row = self.row_index(id).ok_or_else(|| {
                EvalError::InvalidArgument(format!("unknown observation id '{}'", id))
            })?;
            new_ids.push(id.to_string());

            if let Some(row_vec) = self.data.outer_view(old_row) {
                for (col, &val) in row_vec.iter() {
                    tri_mat.add_triplet(new_row, col, val);
                }
            }
        }

        Self::new(tri_mat.to_csr(), new_ids, self.sample_ids.clone())
    }
}

impl AbundanceTable for ObservationTable {
    fn observation_ids(&self) -> Vec<&str> {
        self.observation_ids.iter().map(|s| s.as_str()).collect()
    }

    fn observation_vector(&self, id: &str) -> Option<Vec<f64>> {
        self.row_index(id).map(|row| self.row_dense(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> ObservationTable {
        // 3 observations × 4 samples
        let mut tri_mat = TriMat::new((3, 4));
        tri_mat.add_triplet(0, 0, 10.0);
        tri_mat.add_triplet(0, 1, 20.0);
        tri_mat.add_triplet(0, 3, 5.0);
        tri_mat.add_triplet(1, 0, 100.0);
        tri_mat.add_triplet(1, 1, 200.0);
        tri_mat.add_triplet(1, 2, 150.0);
        tri_mat.add_triplet(1, 3, 175.0);
        tri_mat.add_triplet(2, 0, 1.0);

        let ids = vec!["otu_A".to_string(), "otu_B".to_string(), "otu_C".to_string()];
        let samples = vec![
            "sample1".to_string(),
            "sample2".to_string(),
            "sample3".to_string(),
            "sample4".to_string(),
        ];

        ObservationTable::new(tri_mat.to_csr(), ids, samples).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let table = create_test_table();
        assert_eq!(table.observation_ids().len(), 3);
        assert_eq!(table.n_samples(), 4);
        assert_eq!(table.row_index("otu_B"), Some(1));
    }

    #[test]
    fn test_observation_vector() {
        let table = create_test_table();
        assert_eq!(
            table.observation_vector("otu_A"),
            Some(vec![10.0, 20.0, 0.0, 5.0])
        );
        assert_eq!(
            table.observation_vector("otu_C"),
            Some(vec![1.0, 0.0, 0.0, 0.0])
        );
        assert_eq!(table.observation_vector("otu_Z"), None);
    }

    #[test]
    fn test_from_rows_matches_sparse() {
        let table = ObservationTable::from_rows(
            vec!["a".into(), "b".into()],
            vec!["s1".into(), "s2".into()],
            &[vec![0.0, 2.5], vec![3.0, 0.0]],
        )
        .unwrap();

        assert_eq!(table.observation_vector("a"), Some(vec![0.0, 2.5]));
        assert_eq!(table.observation_vector("b"), Some(vec![3.0, 0.0]));
        assert_eq!(table.observation_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let result = ObservationTable::from_rows(
            vec!["a".into()],
            vec!["s1".into(), "s2".into()],
            &[vec![1.0]],
        );
        assert!(matches!(
            result,
            Err(EvalError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ObservationTable::from_rows(
            vec!["a".into(), "a".into()],
            vec!["s1".into()],
            &[vec![1.0], vec![2.0]],
        );
        assert!(matches!(result, Err(EvalError::InvalidArgument(_))));
    }

    #[test]
    fn test_subset_observations() {
        let table = create_test_table();
        let subset = table.subset_observations(&["otu_C", "otu_A"]).unwrap();

        assert_eq!(subset.observation_ids(), vec!["otu_C", "otu_A"]);
        assert_eq!(subset.n_samples(), 4);
        assert_eq!(
            subset.observation_vector("otu_C"),
            Some(vec![1.0, 0.0, 0.0, 0.0])
        );
        assert_eq!(
            subset.observation_vector("otu_A"),
            Some(vec![10.0, 20.0, 0.0, 5.0])
        );
        assert!(table.subset_observations(&["missing"]).is_err());
    }
}
