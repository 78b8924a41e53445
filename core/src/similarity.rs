use crate::index::TermVector;

/// Cosine of the angle between two sparse vectors; 0.0 when either is a zero vector.
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    let norms = a.norm() * b.norm();
    if norms == 0.0 { 0.0 } else { a.dot(b) / norms }
}

/// Dense, row-major N x N cosine similarity matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Pairwise cosine similarity of L2-normalized vectors (their dot product).
    /// Each pair is computed once and mirrored, so the matrix is exactly symmetric.
    pub fn from_vectors(vectors: &[TermVector]) -> Self {
        let n = vectors.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in i..n {
                let score = vectors[i].dot(&vectors[j]);
                data[i * n + j] = score;
                data[j * n + i] = score;
            }
        }
        Self { n, data }
    }

    pub fn len(&self) -> usize { self.n }

    pub fn is_empty(&self) -> bool { self.n == 0 }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n { Some(self.data[i * self.n + j]) } else { None }
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n { Some(&self.data[i * self.n..(i + 1) * self.n]) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;

    fn matrix(docs: &[&str]) -> SimilarityMatrix {
        let (_, vectors) = IndexBuilder::new().vectorize(docs).unwrap();
        SimilarityMatrix::from_vectors(&vectors)
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let m = matrix(&["action adventure space", "action adventure", "drama romance", "romance comedy action"]);
        assert_eq!(m.len(), 4);
        for i in 0..4 {
            assert!((m.get(i, i).unwrap() - 1.0).abs() < 1e-9);
            for j in 0..4 {
                assert_eq!(m.get(i, j), m.get(j, i));
                let s = m.get(i, j).unwrap();
                assert!(s.is_finite() && (0.0..=1.0 + 1e-9).contains(&s));
            }
        }
    }

    #[test]
    fn entries_equal_cosine_of_vectors() {
        let (_, vectors) = IndexBuilder::new().vectorize(&["action war", "war drama", "drama"]).unwrap();
        let m = SimilarityMatrix::from_vectors(&vectors);
        for i in 0..3 {
            for j in 0..3 {
                assert!((m.get(i, j).unwrap() - cosine(&vectors[i], &vectors[j])).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn cosine_ignores_magnitude() {
        let a = TermVector { entries: vec![(0, 1.0), (1, 1.0)] };
        let b = TermVector { entries: vec![(0, 3.0), (1, 3.0)] };
        assert!((cosine(&a, &b) - 1.0).abs() < 1e-12);
        assert_eq!(cosine(&a, &TermVector::default()), 0.0);
    }

    #[test]
    fn disjoint_documents_score_zero() {
        let m = matrix(&["action adventure", "drama romance"]);
        assert_eq!(m.get(0, 1), Some(0.0));
    }

    #[test]
    fn empty_document_row_is_zero() {
        let m = matrix(&["action", ""]);
        assert_eq!(m.row(1), Some(&[0.0, 0.0][..]));
    }

    #[test]
    fn out_of_range_is_none() {
        let m = matrix(&["action"]);
        assert!(m.get(1, 0).is_none());
        assert!(m.row(1).is_none());
    }
}
