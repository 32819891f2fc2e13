/// A dense vector of doubles: decision vectors, fitness vectors, gradients.
pub type VectorDouble = Vec<f64>;

/// Structurally non-zero entries of a gradient or hessian, as `(row, column)`
/// index pairs.
///
/// Capability detection treats it as an opaque value.
pub type SparsityPattern = Vec<(usize, usize)>;
