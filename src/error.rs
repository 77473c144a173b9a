//! Error types for blur operations.
//!
//! Every failure is local and deterministic: bad parameters, a buffer that
//! does not look like packed ARGB32, or memory exhaustion while allocating a
//! kernel or pass snapshot.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type BlurResult<T> = Result<T, BlurError>;

/// Errors reported by kernel construction and blur passes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlurError {
    /// A numeric parameter was out of range (non-positive or non-finite
    /// sigma, unsupported fixed-point shift, degenerate kernel).
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// A kernel, snapshot, or staging buffer could not be allocated.
    #[error("failed to allocate {what} ({elements} elements)")]
    AllocationFailure { what: &'static str, elements: usize },

    /// The surface is not laid out as packed 8-bit ARGB.
    #[error("pixel format mismatch: {0}")]
    FormatMismatch(String),
}

impl BlurError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        let err = BlurError::InvalidParameter {
            name,
            value: value.to_string(),
        };
        log::debug!("{err}");
        err
    }

    pub(crate) fn alloc(what: &'static str, elements: usize) -> Self {
        let err = BlurError::AllocationFailure { what, elements };
        log::debug!("{err}");
        err
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        let err = BlurError::FormatMismatch(msg.into());
        log::debug!("{err}");
        err
    }
}

/// Allocate a zero-filled `Vec` of `len` elements, reporting exhaustion as
/// [`BlurError::AllocationFailure`] instead of aborting.
pub(crate) fn try_alloc<T: Clone + Default>(what: &'static str, len: usize) -> BlurResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| BlurError::alloc(what, len))?;
    v.resize(len, T::default());
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_parameter() {
        let e = BlurError::invalid("sigma", -1.0);
        assert_eq!(e.to_string(), "invalid parameter `sigma`: -1");
    }

    #[test]
    fn test_display_allocation_failure() {
        let e = BlurError::alloc("snapshot", 42);
        assert_eq!(e.to_string(), "failed to allocate snapshot (42 elements)");
    }

    #[test]
    fn test_try_alloc_zeroed() {
        let v: Vec<u32> = try_alloc("test", 16).unwrap();
        assert_eq!(v.len(), 16);
        assert!(v.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_try_alloc_huge_fails() {
        let r: BlurResult<Vec<u64>> = try_alloc("test", usize::MAX / 2);
        assert!(matches!(
            r,
            Err(BlurError::AllocationFailure { what: "test", .. })
        ));
    }
}
