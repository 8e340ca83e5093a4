use crate::list::node::Link;
use crate::list::{List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// An iterator over the elements of a `List`.
///
/// It walks from `next` forward and stops after yielding `tail`, so it never
/// reads past the recorded end of the list. A missing link before the tail
/// ends the iteration early.
///
/// Though the `Iter` does not hold a reference from the list,
/// it actually *borrows* (immutably) from the list, so a phantom
/// marker of `&'a List<T>` is added to protect the list from being
/// written.
///
/// # Examples
///
/// ```compile_fail
/// use singly_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.append_element(4).unwrap();
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    next: Link<T>,
    tail: Link<T>,
    #[cfg(feature = "length")]
    len: usize,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        let _marker = PhantomData;
        Self {
            next: list.head,
            tail: list.tail,
            #[cfg(feature = "length")]
            len: list.len(),
            _marker,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        for element in self.clone() {
            f.field(element);
        }
        f.finish()
    }
}

/// Step from `current` to its successor, or to `None` once `tail` is done.
fn advance<T>(current: &Node<T>, this: Link<T>, tail: Link<T>) -> Link<T> {
    if this == tail {
        None
    } else {
        current.next
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*next` and move `next` to its successor, or return `None`
    /// once the tail has been yielded.
    fn next(&mut self) -> Option<Self::Item> {
        let this = self.next?;
        // SAFETY: `this` is a node of the list, which stays borrowed for `'a`.
        let current = unsafe { &*this.as_ptr() };
        self.next = advance(current, Some(this), self.tail);
        #[cfg(feature = "length")]
        {
            self.len = self.len.saturating_sub(1);
        }
        Some(&current.element)
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

#[cfg(feature = "length")]
impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// Though the `IterMut` does not hold a reference from the list,
/// it actually *borrows* (mutably) from the list, so a phantom
/// marker of `&'a mut List<T>` is added to protect the list from
/// being read.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use singly_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    next: Link<T>,
    tail: Link<T>,
    #[cfg(feature = "length")]
    len: usize,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let _marker = PhantomData;
        Self {
            next: list.head,
            tail: list.tail,
            #[cfg(feature = "length")]
            len: list.len(),
            _marker,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut link = self.next;
        while let Some(this) = link {
            // SAFETY: the remaining nodes have not been handed out yet and are
            // only read here.
            let current = unsafe { this.as_ref() };
            f.field(&current.element);
            link = advance(current, link, self.tail);
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let this = self.next?;
        // SAFETY: `this` is a node of the list, which stays mutably borrowed
        // for `'a`, and each node is yielded at most once.
        let current = unsafe { &mut *this.as_ptr() };
        self.next = advance(current, Some(this), self.tail);
        #[cfg(feature = "length")]
        {
            self.len = self.len.saturating_sub(1);
        }
        Some(&mut current.element)
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

#[cfg(feature = "length")]
impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    /// Yields the front element. A broken chain ends the iteration: the
    /// remaining reachable nodes are released and the error is logged.
    fn next(&mut self) -> Option<Self::Item> {
        match self.list.pop_front() {
            Ok(element) => element,
            Err(err) => {
                tracing::error!(%err, "owning iteration stopped at a broken list");
                // The break was logged above.
                let _ = self.list.destroy();
                None
            }
        }
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len;
        (len, Some(len))
    }
}

#[cfg(feature = "length")]
impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter()
            .for_each(|item| self.append_node(Node::new(item)));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::list::{List, Node};
    use std::fmt::Debug;

    #[test]
    fn test_iter() {
        macro_rules! test_iter {
            ($FN:ident, $ITER:ident) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec = Vec::from_iter(input);
                    #[allow(unused_mut)]
                    let mut list = List::from_iter(vec.clone());
                    #[cfg(feature = "length")]
                    let len = vec.len();
                    let mut iter = list.$ITER();
                    for (_i, item) in vec.$ITER().take(mid).enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        #[cfg(feature = "length")]
                        assert_eq!(iter.len(), len - _i - 1);
                    }
                    let rest = Vec::from_iter(iter);
                    let expected = Vec::from_iter(vec.$ITER().skip(mid));
                    assert_eq!(rest, expected);

                    let mut iter = list.$ITER();
                    iter.by_ref().for_each(drop);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                }
            };
        }
        test_iter!(test_iter, iter);
        test_iter!(test_iter_mut, iter_mut);

        fn test_case<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            test_iter(input.clone(), mid);
            test_iter_mut(input, mid);
        }
        test_case(0..10, 10);
        test_case(0..10, 5);
        test_case(0..10, 0);
        test_case(0..2, 1);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn test_into_iter_and_extend() {
        let mut list = List::from_iter(vec![String::from("a"), String::from("b")]);
        list.extend([String::from("c")]);
        let mut iter = list.into_iter();
        #[cfg(feature = "length")]
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(Vec::from_iter(iter), vec!["b", "c"]);

        let mut copies = List::<i32>::new();
        copies.extend(&[1, 2, 3]);
        assert_eq!(format!("{:?}", copies), "[1, 2, 3]");
        assert_eq!(format!("{:?}", copies.iter()), "Iter(1, 2, 3)");
        assert_eq!(format!("{:?}", copies.iter_mut()), "IterMut(1, 2, 3)");
    }

    #[test]
    fn test_into_iter_stops_at_broken_list() {
        let mut list = List::from_iter([1, 2, 3, 4]);
        let orphan = list.sever_after(1);
        let mut iter = list.into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), None);
        #[cfg(feature = "length")]
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        drop(iter);
        // The node cut off from the chain is still owned here.
        unsafe { drop(Node::from_link(orphan)) };
    }
}
