use thiserror::Error;

pub type PcResult<T> = Result<T, PcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

impl PcError {
    /// Bounds check helper used by mesh connectivity checks.
    pub fn check_index(what: &'static str, index: usize, len: usize) -> PcResult<()> {
        if index < len {
            Ok(())
        } else {
            Err(PcError::IndexOob { what, index, len })
        }
    }
}
