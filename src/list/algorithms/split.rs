use crate::error::ListError;
use crate::list::List;

impl<T> List<T> {
    /// Splits the list after the node at `index`, moving every later node into
    /// `other`.
    ///
    /// Afterwards `self` holds the nodes `0..=index` and `other` holds the
    /// rest. The nodes are relinked, not copied, and the two lists share none
    /// of them.
    ///
    /// Fails with [`ListError::ListTooSmall`] if the list has fewer than two
    /// nodes, and with [`ListError::IndexOutOfBounds`] if no node follows
    /// `index`. Neither list is modified on error.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `other` is not empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::{List, ListError};
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// let mut other = List::new();
    /// list.split_at(&mut other, 1).unwrap();
    ///
    /// assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2]);
    /// assert_eq!(Vec::from_iter(other.iter().copied()), vec![3, 4, 5]);
    ///
    /// let mut rest = List::new();
    /// assert_eq!(
    ///     list.split_at(&mut rest, 1),
    ///     Err(ListError::IndexOutOfBounds { index: 1, len: 2 })
    /// );
    /// ```
    pub fn split_at(&mut self, other: &mut List<T>, index: usize) -> Result<(), ListError> {
        assert!(other.is_empty(), "Cannot split into a non-empty list");
        match (self.head, self.tail) {
            (Some(head), Some(tail)) if head != tail => {}
            (None, _) => return Err(ListError::ListTooSmall { len: 0, required: 2 }),
            _ => return Err(ListError::ListTooSmall { len: 1, required: 2 }),
        }

        let mut at = self.traverse_node(index)?;
        if Some(at) == self.tail {
            return Err(ListError::IndexOutOfBounds {
                index,
                len: index + 1,
            });
        }
        // SAFETY: `at` is a valid node owned by the list.
        let Some(second_head) = (unsafe { at.as_ref().next }) else {
            tracing::warn!(index = index + 1, "broken list: no successor before the tail");
            return Err(ListError::BrokenList { index: index + 1 });
        };

        other.head = Some(second_head);
        other.tail = self.tail;
        self.tail = Some(at);
        // SAFETY: `at` is now the tail of `self`, cut off from `other`.
        unsafe { at.as_mut().next = None };
        #[cfg(feature = "length")]
        {
            other.len = self.len - (index + 1);
            self.len = index + 1;
        }
        tracing::trace!(index, first = self.len(), second = other.len(), "split list");
        Ok(())
    }

    /// Splits the list after the node at `index`, and returns everything after
    /// it as a new list.
    ///
    /// Errors are the same as for [`List::split_at`].
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let mut list = List::from_iter(['a', 'b', 'c']);
    /// let tail = list.split_off(0).unwrap();
    /// assert_eq!(list, List::from_iter(['a']));
    /// assert_eq!(tail, List::from_iter(['b', 'c']));
    /// ```
    pub fn split_off(&mut self, index: usize) -> Result<List<T>, ListError> {
        let mut other = List::new();
        self.split_at(&mut other, index)?;
        Ok(other)
    }
}
