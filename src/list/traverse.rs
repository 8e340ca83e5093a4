use std::ptr::NonNull;

use crate::error::ListError;
use crate::list::{List, Node, NodeMut};

impl<T> List<T> {
    /// Walk `index` steps from the head and classify the outcome.
    ///
    /// Stepping away from the tail means `index` is out of bounds, while a
    /// missing link before the tail means the chain is broken. This is the
    /// only place where either condition is detected for an indexed access.
    pub(crate) fn traverse_node(&self, index: usize) -> Result<NonNull<Node<T>>, ListError> {
        let (Some(head), Some(tail)) = (self.head, self.tail) else {
            return Err(ListError::IndexOutOfBounds { index, len: 0 });
        };
        let mut current = head;
        for steps in 0..index {
            if current == tail {
                return Err(ListError::IndexOutOfBounds {
                    index,
                    len: steps + 1,
                });
            }
            // SAFETY: `current` is a valid node owned by the list.
            match unsafe { current.as_ref().next } {
                Some(next) => current = next,
                None => {
                    tracing::warn!(index = steps + 1, "broken list: link missing before the tail");
                    return Err(ListError::BrokenList { index: steps + 1 });
                }
            }
        }
        Ok(current)
    }

    /// Provides the node at `index`, or the reason it cannot be reached.
    ///
    /// All indexed operations of the list resolve their position the same
    /// way, so they report the same error for the same boundary condition.
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
    /// let list = List::from_iter([10, 20, 30]);
    /// assert_eq!(list.traverse_to_index(2).map(|node| *node.element()), Ok(30));
    /// assert_eq!(
    ///     list.traverse_to_index(3).err(),
    ///     Some(ListError::IndexOutOfBounds { index: 3, len: 3 })
    /// );
    /// ```
    pub fn traverse_to_index(&self, index: usize) -> Result<&Node<T>, ListError> {
        // SAFETY: the node is owned by the list, which `&self` keeps borrowed.
        self.traverse_node(index).map(|node| unsafe { &*node.as_ptr() })
    }

    /// Provides the node at `index`, or `None` if it cannot be reached.
    ///
    /// Use [`List::traverse_to_index`] to tell an out-of-bounds index from a
    /// broken list.
    pub fn get_node_at_index(&self, index: usize) -> Option<&Node<T>> {
        self.traverse_to_index(index).ok()
    }

    /// Provides mutable access to the element of the node at `index`, or
    /// `None` if it cannot be reached.
    ///
    /// The node stays linked, so only its element is writable; see
    /// [`NodeMut`].
    pub fn get_node_at_index_mut(&mut self, index: usize) -> Option<NodeMut<'_, T>> {
        // SAFETY: the node is owned by the list, which `&mut self` keeps
        // borrowed exclusively, and `NodeMut` never exposes its link.
        self.traverse_node(index)
            .ok()
            .map(|node| NodeMut::new(unsafe { &mut *node.as_ptr() }))
    }

    /// Provides the element at `index`, or `None` if it cannot be reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::List;
    ///
    /// let list = List::from_iter(['a', 'b']);
    /// assert_eq!(list.get_element_at_index(1), Some(&'b'));
    /// assert_eq!(list.get_element_at_index(2), None);
    /// ```
    pub fn get_element_at_index(&self, index: usize) -> Option<&T> {
        self.get_node_at_index(index).map(Node::element)
    }

    pub fn get_element_at_index_mut(&mut self, index: usize) -> Option<&mut T> {
        self.get_node_at_index_mut(index).map(NodeMut::into_element_mut)
    }

    /// Counts the nodes by walking from the head to the tail.
    ///
    /// Unlike [`List::len`], this checks the chain itself, and reports
    /// [`ListError::BrokenList`] with the position of the first missing node
    /// if the tail cannot be reached.
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
    /// let list = List::from_iter(0..4);
    /// assert_eq!(list.calculate_length(), Ok(4));
    /// assert_eq!(List::<u8>::new().calculate_length(), Ok(0));
    /// ```
    pub fn calculate_length(&self) -> Result<usize, ListError> {
        let (Some(head), Some(tail)) = (self.head, self.tail) else {
            return Ok(0);
        };
        let mut current = head;
        let mut count = 1;
        while current != tail {
            // SAFETY: `current` is a valid node owned by the list.
            match unsafe { current.as_ref().next } {
                Some(next) => current = next,
                None => {
                    tracing::warn!(index = count, "broken list: link missing before the tail");
                    return Err(ListError::BrokenList { index: count });
                }
            }
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ListError;
    use crate::list::{List, Node};

    #[test]
    fn traverse_classifies_every_index() {
        let list = List::from_iter(0..5);
        for index in 0..5 {
            let node = list.traverse_to_index(index).unwrap();
            assert_eq!(node.element(), &index);
        }
        let last = list.traverse_to_index(4).unwrap();
        assert!(last.next().is_none());
        assert_eq!(Some(last as *const Node<usize>), list.tail.map(|tail| tail.as_ptr() as *const _));

        for index in 5..8 {
            assert_eq!(
                list.traverse_to_index(index).err(),
                Some(ListError::IndexOutOfBounds { index, len: 5 })
            );
        }
    }

    #[test]
    fn traverse_empty_list() {
        let list = List::<u8>::new();
        assert_eq!(
            list.traverse_to_index(0).err(),
            Some(ListError::IndexOutOfBounds { index: 0, len: 0 })
        );
        assert!(list.get_node_at_index(0).is_none());
        assert!(list.get_element_at_index(3).is_none());
    }

    #[test]
    fn get_element_mut_updates_in_place() {
        let mut list = List::from_iter([1, 2, 3]);
        *list.get_element_at_index_mut(1).unwrap() = 20;
        list.get_node_at_index_mut(2).unwrap().store_element(30);
        assert_eq!(Vec::from_iter(list), vec![1, 20, 30]);
    }

    #[test]
    fn node_handles_of_two_lists_only_exchange_elements() {
        let mut a = List::from_iter(["a0", "a1"]);
        let mut b = List::from_iter(["b0", "b1"]);
        {
            let mut from_a = a.get_node_at_index_mut(0).unwrap();
            let mut from_b = b.get_node_at_index_mut(0).unwrap();
            std::mem::swap(from_a.element_mut(), from_b.element_mut());
            assert_eq!(from_a.next().map(Node::element), Some(&"a1"));
            assert_eq!(from_b.next().map(Node::element), Some(&"b1"));
        }
        assert_eq!(a.calculate_length(), Ok(2));
        assert_eq!(b.calculate_length(), Ok(2));
        assert_eq!(Vec::from_iter(a), vec!["b0", "a1"]);
        assert_eq!(Vec::from_iter(b), vec!["a0", "b1"]);
    }

    #[test]
    fn broken_chain_is_distinguished_from_out_of_bounds() {
        let mut list = List::from_iter([1, 2, 3, 4]);
        let orphan = list.sever_after(1);

        assert_eq!(list.traverse_to_index(1).map(|node| *node.element()), Ok(2));
        assert_eq!(
            list.traverse_to_index(2).err(),
            Some(ListError::BrokenList { index: 2 })
        );
        assert_eq!(
            list.traverse_to_index(9).err(),
            Some(ListError::BrokenList { index: 2 })
        );
        assert!(list.get_node_at_index(3).is_none());
        assert_eq!(list.calculate_length(), Err(ListError::BrokenList { index: 2 }));

        unsafe {
            list.traverse_node(1).unwrap().as_mut().next = Some(orphan);
        }
        assert_eq!(list.calculate_length(), Ok(4));
    }
}
