//! Visible slice of a list around the selection

/// Smallest viewport the list is ever given
pub const MIN_VIEWPORT: usize = 3;

/// Half-open range `[start, end)` of visible rows out of `total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when some rows are hidden
    pub fn is_partial(&self) -> bool {
        self.len() < self.total
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Window of at most `capacity` rows (never fewer than [`MIN_VIEWPORT`])
/// centered on `selected`, shifted back inside `[0, total)`.
pub fn visible_window(total: usize, capacity: usize, selected: usize) -> Window {
    let capacity = capacity.max(MIN_VIEWPORT);
    if total <= capacity {
        return Window {
            start: 0,
            end: total,
            total,
        };
    }

    let mut start = selected.saturating_sub(capacity / 2);
    let mut end = start + capacity;
    if end > total {
        end = total;
        start = total - capacity;
    }

    Window { start, end, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_when_list_fits() {
        for total in 0..=10 {
            for selected in 0..total.max(1) {
                let w = visible_window(total, 10, selected);
                assert_eq!((w.start, w.end), (0, total));
                assert!(!w.is_partial());
            }
        }
    }

    #[test]
    fn test_centered_window_always_contains_selection() {
        for total in 11..60 {
            for capacity in 0..total {
                for selected in 0..total {
                    let w = visible_window(total, capacity, selected);
                    assert_eq!(w.len(), capacity.max(MIN_VIEWPORT));
                    assert!(w.end <= total);
                    assert!(w.contains(selected), "n={} v={} s={}", total, capacity, selected);
                }
            }
        }
    }

    #[test]
    fn test_middle_selection() {
        let w = visible_window(100, 10, 50);
        assert_eq!((w.start, w.end), (45, 55));
        assert!(w.is_partial());
    }

    #[test]
    fn test_clamped_at_edges() {
        let w = visible_window(100, 10, 0);
        assert_eq!((w.start, w.end), (0, 10));

        let w = visible_window(100, 10, 99);
        assert_eq!((w.start, w.end), (90, 100));
    }

    #[test]
    fn test_minimum_viewport() {
        let w = visible_window(20, 1, 10);
        assert_eq!(w.len(), MIN_VIEWPORT);
        assert_eq!((w.start, w.end), (9, 12));
    }

    #[test]
    fn test_empty_list() {
        let w = visible_window(0, 10, 0);
        assert!(w.is_empty());
        assert!(!w.is_partial());
    }
}
