use std::alloc::{self, Layout};
use std::fmt;
use std::mem;
use std::ptr::NonNull;

use crate::error::AllocError;

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// A node of a [`List`](crate::List), holding one element and a link to the
/// next node.
///
/// A node that is not part of any list is handled as a `Box<Node<T>>`, whose
/// link is always empty. Handing the box to a list moves ownership into the
/// list; removing the node from the list hands a box back.
pub struct Node<T> {
    pub(crate) next: Link<T>,
    pub(crate) element: T,
}

impl<T> Node<T> {
    /// Create a detached node storing `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::Node;
    ///
    /// let node = Node::new(7);
    /// assert_eq!(node.element(), &7);
    /// assert!(node.next().is_none());
    /// ```
    pub fn new(element: T) -> Box<Self> {
        Box::new(Node {
            next: None,
            element,
        })
    }

    /// Create a detached node storing `element`, reporting an allocation
    /// failure instead of aborting.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::Node;
    ///
    /// let node = Node::try_new("a").unwrap();
    /// assert_eq!(*node.element(), "a");
    /// ```
    pub fn try_new(element: T) -> Result<Box<Self>, AllocError> {
        let layout = Layout::new::<Node<T>>();
        // SAFETY: `Node<T>` always holds a link, so `layout` is never zero-sized.
        let ptr = NonNull::new(unsafe { alloc::alloc(layout) } as *mut Node<T>)
            .ok_or_else(|| AllocError::new(layout))?;
        // SAFETY: `ptr` is freshly allocated with the layout of `Node<T>` by the
        // global allocator, which is exactly what `Box` expects to own.
        unsafe {
            ptr.as_ptr().write(Node {
                next: None,
                element,
            });
            Ok(Box::from_raw(ptr.as_ptr()))
        }
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut T {
        &mut self.element
    }

    /// Replace the stored element, returning the previous one.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::Node;
    ///
    /// let mut node = Node::new(1);
    /// assert_eq!(node.store_element(2), 1);
    /// assert_eq!(node.element(), &2);
    /// ```
    pub fn store_element(&mut self, element: T) -> T {
        mem::replace(&mut self.element, element)
    }

    /// Return an independent copy of the stored element.
    pub fn copy_element(&self) -> T
    where
        T: Clone,
    {
        self.element.clone()
    }

    /// Release the node, keeping its element.
    pub fn into_element(self: Box<Self>) -> T {
        self.element
    }

    /// The node following this one, or `None` for the tail or a detached node.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let head = list.get_node_at_index(0).unwrap();
    /// assert_eq!(head.next().map(|node| *node.element()), Some(2));
    /// assert!(head.next().unwrap().next().is_none());
    /// ```
    pub fn next(&self) -> Option<&Node<T>> {
        // SAFETY: a non-empty link only exists while the node is owned by a
        // list, and `&self` borrows from that list, which keeps the successor
        // alive and unmodified.
        self.next.map(|next| unsafe { &*next.as_ptr() })
    }

    /// Move a detached node into raw ownership, ready to be linked.
    pub(crate) fn into_link(self: Box<Self>) -> NonNull<Node<T>> {
        debug_assert!(self.next.is_none(), "a detached node must not be linked");
        NonNull::from(Box::leak(self))
    }

    /// Take back ownership of a node that has been unlinked from its list.
    ///
    /// It is unsafe because `node` must come from [`Node::into_link`] and must
    /// no longer be reachable from any list.
    pub(crate) unsafe fn from_link(node: NonNull<Node<T>>) -> Box<Self> {
        let mut node = Box::from_raw(node.as_ptr());
        node.next = None;
        node
    }
}

/// Mutable access to a node that stays linked in its list.
///
/// Only the element can be changed through a `NodeMut`. The node itself,
/// and with it the link to its successor, is never handed out mutably, so
/// it cannot be swapped or replaced with a node of another list.
///
/// # Examples
///
/// ```
/// use singly_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut node = list.get_node_at_index_mut(1).unwrap();
/// assert_eq!(node.store_element(20), 2);
/// *node.element_mut() += 1;
/// assert_eq!(Vec::from_iter(list), vec![1, 21, 3]);
/// ```
///
/// The nodes of two lists cannot be exchanged:
///
/// ```compile_fail
/// use singly_list::List;
///
/// let mut a = List::from_iter([1, 2]);
/// let mut b = List::from_iter([3, 4]);
/// std::mem::swap(
///     &mut *a.get_node_at_index_mut(0).unwrap(),
///     &mut *b.get_node_at_index_mut(0).unwrap(),
/// );
/// ```
pub struct NodeMut<'a, T> {
    node: &'a mut Node<T>,
}

impl<'a, T> NodeMut<'a, T> {
    pub(crate) fn new(node: &'a mut Node<T>) -> Self {
        Self { node }
    }

    pub fn element_mut(&mut self) -> &mut T {
        &mut self.node.element
    }

    /// Replace the stored element, returning the previous one.
    pub fn store_element(&mut self, element: T) -> T {
        self.node.store_element(element)
    }

    /// Turn the handle into a reference to the element, for the whole borrow.
    pub fn into_element_mut(self) -> &'a mut T {
        &mut self.node.element
    }
}

impl<T> std::ops::Deref for NodeMut<'_, T> {
    type Target = Node<T>;

    fn deref(&self) -> &Node<T> {
        self.node
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.node, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("element", &self.element)
            .field("linked", &self.next.is_some())
            .finish()
    }
}
