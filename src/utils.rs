//! Utility functions.

/// Aligns an address or size up to the next multiple of `align`.
/// `align` must be a power of two. Returns `None` if the result does not fit in a `u64`.
pub fn align_up(addr: u64, align: u64) -> Option<u64> {
    assert!(align.is_power_of_two());
    addr.checked_add(align - 1).map(|v| v & !(align - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_word() {
        assert_eq!(align_up(0, 4), Some(0));
        assert_eq!(align_up(5, 4), Some(8));
        assert_eq!(align_up(8, 4), Some(8));
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!(align_up(u64::MAX, 4), None);
        assert_eq!(align_up(u64::MAX - 3, 4), Some(u64::MAX - 3));
    }
}
