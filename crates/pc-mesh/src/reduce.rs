//! Global reductions across mesh partitions.

/// Reduction primitive supplied by the parallel runtime.
///
/// Each partition calls the same reductions in the same order; the result is
/// the global value on every partition.
pub trait Reduction: Send + Sync {
    /// Global sum of a per-partition scalar.
    fn sum(&self, local: f64) -> f64;

    /// Global sum of a per-partition count.
    fn sum_count(&self, local: usize) -> usize;

    /// Global arithmetic mean of values distributed over partitions.
    fn average(&self, local: &[f64]) -> f64 {
        let n = self.sum_count(local.len());
        if n == 0 {
            return 0.0;
        }
        self.sum(local.iter().sum()) / n as f64
    }
}

/// Single-partition reduction: every global value is the local one.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialReduction;

impl Reduction for SerialReduction {
    fn sum(&self, local: f64) -> f64 {
        local
    }

    fn sum_count(&self, local: usize) -> usize {
        local
    }
}
