use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

pub use execute::{Completion, Execution};

mod execute;
mod split;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Overwrites the elements in place and only allocates or releases the
    /// nodes by which the lengths differ.
    fn clone_from(&mut self, source: &Self) {
        let mut source_iter = source.iter();
        let mut reused = 0;
        for (element, from) in self.iter_mut().zip(&mut source_iter) {
            element.clone_from(from);
            reused += 1;
        }
        if reused == 0 {
            // A broken list has been logged and released by `destroy`.
            let _ = self.destroy();
        } else if reused < self.len() {
            let surplus = self.split_off(reused - 1);
            drop(surplus);
        }
        self.extend(source_iter.cloned());
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let list = List::from_iter([0, 1, 2]);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.find_node_containing_element(x, |a, b| a == b).is_some()
    }
}
