//! Seeded randomness and the per-batch parameter draw.

/// Parameter distributions (constant, uniform range, discrete choice).
pub mod distribution;
/// Batch parameter sampling in a fixed draw order.
pub mod sampler;
/// Deterministic random stream with substream splitting.
pub mod stream;
