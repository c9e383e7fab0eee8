pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Steps an optional selection through `0..len`; the first step from nothing
/// lands on the first (or, backwards, the last) entry.
pub const fn cycle_selection(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match (current, forward) {
        (None, true) => Some(0),
        (None, false) => Some(len - 1),
        (Some(index), true) => Some(wrap_increment(index, len)),
        (Some(index), false) => Some(wrap_decrement(index, len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_in_both_directions() {
        assert_eq!(cycle_selection(None, 3, true), Some(0));
        assert_eq!(cycle_selection(None, 3, false), Some(2));
        assert_eq!(cycle_selection(Some(2), 3, true), Some(0));
        assert_eq!(cycle_selection(Some(0), 3, false), Some(2));
        assert_eq!(cycle_selection(Some(1), 0, true), None);
    }
}
