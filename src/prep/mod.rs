//! Input preparation ahead of augmentation.

/// Grayscale ingestion, aspect-preserving resize and centered padding.
pub mod resize;
