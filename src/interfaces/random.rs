pub trait RandomSource: Send + Sync {
    /// Uniform draw from `0..len`. `len` must be non-zero.
    fn index(&self, len: usize) -> usize;
}
