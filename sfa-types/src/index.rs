use crate::error::SpatialError;

/// Resolves an element index. Negative indices count from the end, `-1` being the last element.
pub(crate) fn resolve_index(index: isize, len: usize) -> Result<usize, SpatialError> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index.unsigned_abs())
    };

    match resolved {
        Some(i) if i < len => Ok(i),
        _ => Err(SpatialError::IndexOutOfRange { index, len }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_indices_count_from_end() {
        assert_eq!(resolve_index(-1, 3), Ok(2));
        assert_eq!(resolve_index(-3, 3), Ok(0));
        assert_eq!(resolve_index(0, 3), Ok(0));
        assert_eq!(resolve_index(2, 3), Ok(2));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            resolve_index(3, 3),
            Err(SpatialError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(resolve_index(-4, 3).is_err());
        assert!(resolve_index(-1, 0).is_err());
        assert!(resolve_index(0, 0).is_err());
        assert!(resolve_index(isize::MIN, 3).is_err());
    }
}
