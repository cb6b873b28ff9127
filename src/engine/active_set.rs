use std::collections::VecDeque;

/// Live obstacles in spawn order. Only the front is ever evicted.
#[derive(Clone, Debug)]
pub struct ActiveSet<T> {
    items: VecDeque<T>,
}

impl<T> Default for ActiveSet<T> {
    fn default() -> Self {
        Self { items: VecDeque::new() }
    }
}

impl<T> ActiveSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Pop from the front while the oldest item fails `visible`.
    /// Returns how many were evicted.
    pub fn prune(&mut self, visible: impl Fn(&T) -> bool) -> usize {
        let mut evicted = 0;
        while self.items.front().is_some_and(|front| !visible(front)) {
            self.items.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

impl<'a, T> IntoIterator for &'a ActiveSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_prune_stops_at_first_visible() {
        let mut set = ActiveSet::new();
        for x in [-20, -5, 40, -30] {
            set.push(x);
        }
        // Only the front run of invisible items goes; -30 sits behind a visible one
        let evicted = set.prune(|x| *x > -10);
        assert_eq!(evicted, 1);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![-5, 40, -30]);
    }

    #[test]
    fn test_prune_empty_set() {
        let mut set: ActiveSet<i32> = ActiveSet::new();
        assert_eq!(set.prune(|_| false), 0);
        assert!(set.is_empty());
    }

    proptest! {
        // Items scroll left at the same speed, so spawn order is also
        // left-to-right order and front pruning leaves only visible items.
        #[test]
        fn prop_pruned_set_is_visible(count in 0usize..40, scroll in 0i32..400) {
            let mut set = ActiveSet::new();
            for i in 0..count {
                set.push(i as i32 * 10 - scroll);
            }
            set.prune(|x| *x > -10);
            prop_assert!(set.iter().all(|x| *x > -10));
            let survivors = set.len();
            let expected = (0..count).filter(|i| *i as i32 * 10 - scroll > -10).count();
            prop_assert_eq!(survivors, expected);
        }
    }
}
