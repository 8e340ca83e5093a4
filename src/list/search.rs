use crate::list::node::Link;
use crate::list::{List, Node};
use std::fmt;
use std::iter::FusedIterator;

/// A node found by a [`Search`], together with its position in the list.
pub struct Match<'a, T: 'a> {
    pub index: usize,
    pub node: &'a Node<T>,
}

impl<'a, T: 'a> Match<'a, T> {
    pub fn element(&self) -> &'a T {
        self.node.element()
    }
}

impl<'a, T: 'a> Clone for Match<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: 'a> Copy for Match<'a, T> {}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Match<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("index", &self.index)
            .field("element", self.node.element())
            .finish()
    }
}

/// A linear search session over a `List`.
///
/// The session remembers where the previous match was found, so that
/// [`Search::next_match`] continues right after it. This makes it possible to
/// visit every occurrence of a target one call at a time.
/// [`Search::restart`] starts a new session from the head.
///
/// Each `Search` owns its position, so any number of searches may run over
/// the same list, interleaved in any order. The list is borrowed for as long
/// as a search is alive, so it cannot change under a running session.
///
/// # Examples
///
/// ```
/// use singly_list::List;
///
/// let list = List::from_iter([75, 23, 63, 77, 91, 77]);
/// let mut search = list.search(&77, |a, b| a == b);
///
/// assert_eq!(search.next_match().map(|found| found.index), Some(3));
/// assert_eq!(search.next_match().map(|found| found.index), Some(5));
/// assert!(search.next_match().is_none());
///
/// search.restart(&63);
/// assert_eq!(search.next_match().map(|found| found.index), Some(2));
/// ```
pub struct Search<'a, 'q, T: 'a, F> {
    list: &'a List<T>,
    target: &'q T,
    eq: F,
    next: Link<T>,
    index: usize,
}

impl<'a, 'q, T: 'a, F> Search<'a, 'q, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    pub(crate) fn new(list: &'a List<T>, target: &'q T, eq: F) -> Self {
        Self {
            list,
            target,
            eq,
            next: list.head,
            index: 0,
        }
    }

    /// Scan forward from the current position and return the next node whose
    /// element equals the target, or `None` once the tail has been passed.
    pub fn next_match(&mut self) -> Option<Match<'a, T>> {
        while let Some(this) = self.next {
            // SAFETY: `this` is a node of the list, which stays borrowed for `'a`.
            let node = unsafe { &*this.as_ptr() };
            let index = self.index;
            self.next = if self.next == self.list.tail {
                None
            } else {
                node.next
            };
            self.index += 1;
            if (self.eq)(&node.element, self.target) {
                return Some(Match { index, node });
            }
        }
        tracing::trace!(scanned = self.index, "search exhausted");
        None
    }

    /// Reset the session to the head of the list with a new target.
    pub fn restart(&mut self, target: &'q T) {
        self.target = target;
        self.next = self.list.head;
        self.index = 0;
    }

    /// The index the next scan starts from.
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<'a, 'q, T: 'a, F> Iterator for Search<'a, 'q, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_match()
    }
}

impl<'a, 'q, T: 'a, F> FusedIterator for Search<'a, 'q, T, F> where F: FnMut(&T, &T) -> bool {}

impl<'a, 'q, T: fmt::Debug + 'a, F> fmt::Debug for Search<'a, 'q, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("target", self.target)
            .field("position", &self.index)
            .finish()
    }
}

unsafe impl<T: Sync, F: Send> Send for Search<'_, '_, T, F> {}

unsafe impl<T: Sync, F: Sync> Sync for Search<'_, '_, T, F> {}

impl<T> List<T> {
    /// Start a search session for elements equal to `target` under `eq`.
    ///
    /// See [`Search`] for continuing the session.
    pub fn search<'a, 'q, F>(&'a self, target: &'q T, eq: F) -> Search<'a, 'q, T, F>
    where
        F: FnMut(&T, &T) -> bool,
    {
        Search::new(self, target, eq)
    }

    /// Returns the first node whose element equals `target` under `eq`, with
    /// its index.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let list = List::from_iter(["x", "y", "z"]);
    /// let found = list.find_node_containing_element(&"y", |a, b| a == b).unwrap();
    /// assert_eq!(found.index, 1);
    /// assert_eq!(found.element(), &"y");
    /// assert!(list.find_node_containing_element(&"w", |a, b| a == b).is_none());
    /// ```
    pub fn find_node_containing_element<F>(&self, target: &T, eq: F) -> Option<Match<'_, T>>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.search(target, eq).next_match()
    }
}

#[cfg(test)]
mod tests {
    use crate::List;

    fn equals(a: &i32, b: &i32) -> bool {
        a == b
    }

    #[test]
    fn search_continues_after_previous_match() {
        let list = List::from_iter([75, 23, 63, 77, 91, 77]);
        let mut search = list.search(&77, equals);
        let first = search.next_match().unwrap();
        assert_eq!((first.index, *first.element()), (3, 77));
        assert_eq!(search.position(), 4);
        let second = search.next_match().unwrap();
        assert_eq!((second.index, *second.element()), (5, 77));
        assert!(second.node.next().is_none());
        assert!(search.next_match().is_none());
        assert!(search.next_match().is_none());
    }

    #[test]
    fn search_missing_element() {
        let list = List::from_iter([75, 23, 63, 77, 91, 77]);
        assert!(list.find_node_containing_element(&999, equals).is_none());
        assert!(List::new().find_node_containing_element(&1, equals).is_none());
    }

    #[test]
    fn search_restart_resets_session() {
        let list = List::from_iter([1, 2, 1, 2]);
        let mut search = list.search(&2, equals);
        assert_eq!(search.next_match().map(|m| m.index), Some(1));
        search.restart(&1);
        assert_eq!(search.position(), 0);
        assert_eq!(Vec::from_iter(search.map(|m| m.index)), vec![0, 2]);
    }

    #[test]
    fn interleaved_searches_are_independent() {
        let list = List::from_iter([5, 6, 5, 6, 5]);
        let mut fives = list.search(&5, equals);
        let mut sixes = list.search(&6, equals);
        assert_eq!(fives.next().map(|m| m.index), Some(0));
        assert_eq!(sixes.next().map(|m| m.index), Some(1));
        assert_eq!(fives.next().map(|m| m.index), Some(2));
        assert_eq!(sixes.next().map(|m| m.index), Some(3));
        assert_eq!(fives.next().map(|m| m.index), Some(4));
        assert!(sixes.next().is_none());
    }

    #[test]
    fn search_moves_to_another_thread() {
        fn assert_send_sync<S: Send + Sync>(_: &S) {}

        let list = List::from_iter([3, 1, 3]);
        let search = list.search(&3, equals);
        assert_send_sync(&search);
        let hits = std::thread::scope(|s| {
            s.spawn(move || Vec::from_iter(search.map(|m| m.index)))
                .join()
                .unwrap()
        });
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn search_with_custom_equality() {
        let list = List::from_iter(["Apple", "banana", "APPLE"]);
        let hits = Vec::from_iter(
            list.search(&"apple", |a, b| a.eq_ignore_ascii_case(b))
                .map(|m| m.index),
        );
        assert_eq!(hits, vec![0, 2]);
    }
}
