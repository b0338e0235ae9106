use sp_matrix::SparseMatrix;

/// Opaque matrix handle owned by C callers.
///
/// Created by `sp_matrix_create` or `sp_matrix_load`, released with
/// `sp_matrix_destroy`.
pub struct SpMatrix {
    pub matrix: SparseMatrix,
}

impl SpMatrix {
    pub fn new(matrix: SparseMatrix) -> Self {
        Self { matrix }
    }
}
