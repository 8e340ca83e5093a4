use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::ListError;
use crate::{Iter, IterMut};

pub use node::{Node, NodeMut};
use node::Link;

pub mod algorithms;
pub mod iterator;
pub mod node;
pub mod search;

mod traverse;

/// The `List` is a singly-linked list with owned nodes, tracking both its
/// first node (head) and its last node (tail).
///
/// Appending and inserting at the front take *O*(1) time. Every indexed
/// operation walks forward from the head once, in *O*(*n*) time.
///
/// The `List` contains:
/// - a pointer `head` to the first node and a pointer `tail` to the last node,
///   both empty exactly when the list is empty;
/// - a length field `len` indicating the length of the list. It can be disabled by
///   disabling the `length` feature in your `Cargo.toml`:
/// ```text
/// [dependencies]
/// singly_list = { default-features = false }
/// ```
///
/// Following the links from `head` always reaches `tail`, whose link is empty.
/// Operations that find this chain interrupted report
/// [`ListError::BrokenList`] instead of guessing.
pub struct List<T> {
    pub(crate) head: Link<T>,
    pub(crate) tail: Link<T>,
    #[cfg(feature = "length")]
    /// the length of the list
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// private methods
impl<T> List<T> {
    /// Link a detached node behind the tail.
    fn attach_back(&mut self, node: NonNull<Node<T>>) {
        match self.tail {
            // SAFETY: `tail` is a valid node owned by the list.
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
    }

    /// Link a detached node in front of the head.
    fn attach_front(&mut self, mut node: NonNull<Node<T>>) {
        // SAFETY: `node` is detached, so nothing else refers to it.
        unsafe { node.as_mut().next = self.head };
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
    }

    /// Link a detached node between `prev` and its successor `next`.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the
    /// list or whether `next` is really the successor of `prev`.
    unsafe fn attach_after(
        &mut self,
        mut prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        mut node: NonNull<Node<T>>,
    ) {
        debug_assert_eq!(prev.as_ref().next, Some(next));
        node.as_mut().next = Some(next);
        prev.as_mut().next = Some(node);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
    }

    /// Unlink the head and hand it back, or return `None` if the list is empty.
    fn detach_front(&mut self) -> Result<Option<Box<Node<T>>>, ListError> {
        let Some(head) = self.head else {
            return Ok(None);
        };
        if self.head == self.tail {
            self.head = None;
            self.tail = None;
        } else {
            // SAFETY: `head` is a valid node owned by the list.
            let next = unsafe { head.as_ref().next };
            if next.is_none() {
                tracing::warn!(index = 1, "broken list: head has no successor");
                return Err(ListError::BrokenList { index: 1 });
            }
            self.head = next;
        }
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        // SAFETY: `head` came from `Node::into_link` and is no longer reachable.
        Ok(Some(unsafe { Node::from_link(head) }))
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use singly_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        let _marker = PhantomData;
        Self {
            head: None,
            tail: None,
            #[cfg(feature = "length")]
            len: 0,
            _marker,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time with the `length`
    /// feature, and in *O*(*n*) time without it.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let mut list = List::new();
    /// list.append_element(2).unwrap();
    /// list.append_element(3).unwrap();
    /// assert_eq!(list.len(), 2);
    /// ```
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(not(feature = "length"))]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: `head` is a valid node owned by the list.
        self.head.map(|head| unsafe { &(*head.as_ptr()).element })
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.front(), Some(&1));
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn back(&self) -> Option<&T> {
        // SAFETY: `tail` is a valid node owned by the list.
        self.tail.map(|tail| unsafe { &(*tail.as_ptr()).element })
    }

    /// Appends a detached node to the back of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::{List, Node};
    ///
    /// let mut list = List::new();
    /// list.append_node(Node::new(1));
    /// list.append_node(Node::new(3));
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn append_node(&mut self, node: Box<Node<T>>) {
        self.attach_back(node.into_link());
        tracing::trace!(len = self.len(), "appended node");
    }

    /// Creates a node holding `element` and appends it to the back of the list.
    ///
    /// Fails with [`ListError::NodeCreation`] if the node cannot be allocated.
    pub fn append_element(&mut self, element: T) -> Result<(), ListError> {
        let node = Node::try_new(element)?;
        self.append_node(node);
        Ok(())
    }

    /// Like [`List::append_element`], but stores a copy of `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let x = String::from("shared");
    /// let mut list = List::new();
    /// list.append_element_copy(&x).unwrap();
    /// assert_eq!(list.front(), Some(&x));
    /// ```
    pub fn append_element_copy(&mut self, element: &T) -> Result<(), ListError>
    where
        T: Clone,
    {
        self.append_element(element.clone())
    }

    /// Inserts a detached node so that it is reached after `index` steps from
    /// the head.
    ///
    /// At index 0 the node becomes the new head, except when the list holds
    /// exactly one node: the new node is then linked *after* that node and
    /// becomes the tail, leaving the head in place.
    ///
    /// For `index > 0` the node at `index - 1` is resolved first, and its
    /// failure is forwarded unchanged. Inserting behind the tail appends. On
    /// error the offered node is released.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::{List, ListError, Node};
    ///
    /// let mut list = List::from_iter([1, 2, 4]);
    /// list.insert_node_at_index(Node::new(3), 2).unwrap();
    /// list.insert_node_at_index(Node::new(5), 4).unwrap();
    /// assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 3, 4, 5]);
    ///
    /// assert_eq!(
    ///     list.insert_node_at_index(Node::new(9), 7),
    ///     Err(ListError::IndexOutOfBounds { index: 6, len: 5 })
    /// );
    /// ```
    pub fn insert_node_at_index(&mut self, node: Box<Node<T>>, index: usize) -> Result<(), ListError> {
        if index == 0 {
            match (self.head, self.tail) {
                (Some(head), Some(tail)) if head != tail => self.attach_front(node.into_link()),
                _ => self.attach_back(node.into_link()),
            }
            tracing::trace!(index, len = self.len(), "inserted node");
            return Ok(());
        }

        let prev = self.traverse_node(index - 1)?;
        if Some(prev) == self.tail {
            self.attach_back(node.into_link());
        } else {
            // SAFETY: `prev` is a valid node owned by the list.
            let Some(next) = (unsafe { prev.as_ref().next }) else {
                tracing::warn!(index, "broken list: no successor before the tail");
                return Err(ListError::BrokenList { index });
            };
            // SAFETY: `next` is the successor of `prev`, both owned by the list.
            unsafe { self.attach_after(prev, next, node.into_link()) };
        }
        tracing::trace!(index, len = self.len(), "inserted node");
        Ok(())
    }

    /// Creates a node holding `element` and inserts it as
    /// [`List::insert_node_at_index`] does.
    pub fn insert_element_at_index(&mut self, element: T, index: usize) -> Result<(), ListError> {
        let node = Node::try_new(element)?;
        self.insert_node_at_index(node, index)
    }

    /// Like [`List::insert_element_at_index`], but stores a copy of `element`.
    pub fn insert_element_copy_at_index(&mut self, element: &T, index: usize) -> Result<(), ListError>
    where
        T: Clone,
    {
        self.insert_element_at_index(element.clone(), index)
    }

    /// Unlinks the node at `index` and hands it back.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::{List, ListError};
    ///
    /// let mut list = List::from_iter(['a', 'b', 'c']);
    /// let node = list.remove_node_at_index(1).unwrap();
    /// assert_eq!(node.into_element(), 'b');
    /// assert_eq!(list.back(), Some(&'c'));
    ///
    /// assert_eq!(
    ///     list.remove_node_at_index(2).err(),
    ///     Some(ListError::IndexOutOfBounds { index: 2, len: 2 })
    /// );
    /// ```
    pub fn remove_node_at_index(&mut self, index: usize) -> Result<Box<Node<T>>, ListError> {
        if index == 0 {
            let node = self
                .detach_front()?
                .ok_or(ListError::IndexOutOfBounds { index, len: 0 })?;
            tracing::trace!(index, len = self.len(), "removed node");
            return Ok(node);
        }

        let mut prev = self.traverse_node(index - 1)?;
        if Some(prev) == self.tail {
            return Err(ListError::IndexOutOfBounds { index, len: index });
        }
        // SAFETY: `prev` is a valid node owned by the list.
        let Some(target) = (unsafe { prev.as_ref().next }) else {
            tracing::warn!(index, "broken list: no successor before the tail");
            return Err(ListError::BrokenList { index });
        };
        // SAFETY: `target` is the successor of `prev`, both owned by the list.
        unsafe {
            if Some(target) == self.tail {
                prev.as_mut().next = None;
                self.tail = Some(prev);
            } else {
                prev.as_mut().next = target.as_ref().next;
            }
        }
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        tracing::trace!(index, len = self.len(), "removed node");
        // SAFETY: `target` came from `Node::into_link` and is no longer reachable.
        Ok(unsafe { Node::from_link(target) })
    }

    /// Removes the node at `index`, releasing it together with its element.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let mut list = List::from_iter([111, 75, 23, 63]);
    /// list.delete_node_at_index(1).unwrap();
    /// assert_eq!(Vec::from_iter(list), vec![111, 23, 63]);
    /// ```
    pub fn delete_node_at_index(&mut self, index: usize) -> Result<(), ListError> {
        self.remove_node_at_index(index).map(drop)
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// Fails with [`ListError::BrokenList`] if the head has no successor
    /// although it is not the tail. The list is left unchanged in that case.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let mut list = List::from_iter([1, 2]);
    /// assert_eq!(list.pop_front(), Ok(Some(1)));
    /// assert_eq!(list.pop_front(), Ok(Some(2)));
    /// assert_eq!(list.pop_front(), Ok(None));
    /// ```
    pub fn pop_front(&mut self) -> Result<Option<T>, ListError> {
        Ok(self.detach_front()?.map(Node::into_element))
    }

    /// Releases every node and element of the list, leaving it empty and
    /// reusable.
    ///
    /// The teardown walks from the head and checks that it really ends at the
    /// recorded tail. If the chain is interrupted first, the nodes that could
    /// be reached and the tail are still released and
    /// [`ListError::BrokenList`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.destroy(), Ok(()));
    /// assert!(list.is_empty());
    /// assert_eq!(list.destroy(), Ok(()));
    /// ```
    pub fn destroy(&mut self) -> Result<(), ListError> {
        let mut current = self.head;
        let mut released = 0;
        while let Some(node) = current {
            if current == self.tail {
                break;
            }
            // SAFETY: every node before the tail is reached exactly once and
            // released right after its link has been read.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            current = node.next;
            released += 1;
        }

        let result = if current == self.tail {
            Ok(())
        } else {
            tracing::warn!(index = released, "broken list: teardown never reached the tail");
            Err(ListError::BrokenList { index: released })
        };
        if let Some(tail) = self.tail.take() {
            // SAFETY: the walk above stopped before the tail, so it is released once.
            drop(unsafe { Box::from_raw(tail.as_ptr()) });
            released += 1;
        }
        self.head = None;
        #[cfg(feature = "length")]
        {
            self.len = 0;
        }
        tracing::trace!(released, "destroyed list");
        result
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let list = List::from_iter([0, 1, 2]);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let mut list = List::from_iter([0, 1, 2]);
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        if let Err(err) = self.destroy() {
            tracing::error!(%err, "dropped a broken list");
        }
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
}

#[cfg(test)]
impl<T> List<T> {
    /// Cut the link behind the node at `index` without moving the tail, and
    /// return the first node that became unreachable.
    pub(crate) fn sever_after(&mut self, index: usize) -> NonNull<Node<T>> {
        let mut node = self.traverse_node(index).unwrap();
        unsafe { node.as_mut().next.take().unwrap() }
    }
}
