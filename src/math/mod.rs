//! Numeric helpers for band rendering

/// Contrast stretch between the extremes of valid samples
pub mod stretch;
