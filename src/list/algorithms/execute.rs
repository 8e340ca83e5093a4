use std::ptr::NonNull;

use derive_more::IsVariant;

use crate::error::ListError;
use crate::list::{List, Node};

/// What a callback passed to [`List::execute_on_elements`] asks for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Execution {
    /// Move on to the next element.
    Continue,
    /// The callback is done; end the scan successfully.
    Stop,
    /// The callback failed; end the scan with
    /// [`ListError::CallbackExecution`].
    Error,
}

/// How a successful scan over the elements ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Completion {
    /// Every element up to and including the tail was processed.
    Finished,
    /// The callback asked to stop at the element at `index`.
    Stopped { index: usize },
}

impl<T> List<T> {
    /// Feed every node from head to tail to `f`, along with its index.
    fn walk<F>(&self, mut f: F) -> Result<Completion, ListError>
    where
        F: FnMut(NonNull<Node<T>>, usize) -> Execution,
    {
        let (Some(mut current), Some(tail)) = (self.head, self.tail) else {
            return Ok(Completion::Finished);
        };
        let mut index = 0;
        loop {
            match f(current, index) {
                Execution::Continue => {}
                Execution::Stop => return Ok(Completion::Stopped { index }),
                Execution::Error => return Err(ListError::CallbackExecution { index }),
            }
            if current == tail {
                return Ok(Completion::Finished);
            }
            index += 1;
            // SAFETY: `current` is a valid node owned by the list; the callback
            // only touched its element.
            current = match unsafe { current.as_ref().next } {
                Some(next) => next,
                None => {
                    tracing::warn!(index, "broken list: link missing before the tail");
                    return Err(ListError::BrokenList { index });
                }
            };
        }
    }

    /// Calls `f` on every element in order, passing the element, its node,
    /// its index and the shared `context`.
    ///
    /// The scan ends early when `f` returns [`Execution::Stop`] (a success,
    /// reported as [`Completion::Stopped`]) or [`Execution::Error`] (reported
    /// as [`ListError::CallbackExecution`] with the failing index). A broken
    /// chain ends it with [`ListError::BrokenList`].
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::{Completion, Execution, List};
    ///
    /// let list = List::from_iter([3, 9, 4]);
    /// let mut max: Option<i32> = None;
    /// let result = list.execute_on_elements(&mut max, |element, _node, _index, max| {
    ///     if max.map_or(true, |m| *element > m) {
    ///         *max = Some(*element);
    ///     }
    ///     Execution::Continue
    /// });
    /// assert_eq!(result, Ok(Completion::Finished));
    /// assert_eq!(max, Some(9));
    /// ```
    pub fn execute_on_elements<'a, C, F>(&'a self, context: &mut C, mut f: F) -> Result<Completion, ListError>
    where
        C: ?Sized,
        F: FnMut(&'a T, &'a Node<T>, usize, &mut C) -> Execution,
    {
        self.walk(|node, index| {
            // SAFETY: the node is owned by the list, which stays borrowed for `'a`.
            let node: &'a Node<T> = unsafe { &*node.as_ptr() };
            f(node.element(), node, index, &mut *context)
        })
    }

    /// Like [`List::execute_on_elements`], but hands out each element mutably.
    ///
    /// # Examples
    ///
    /// ```
    /// use singly_list::{Execution, List, ListError};
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let result = list.execute_on_elements_mut(&mut (), |element, index, _| {
    ///     if index == 2 {
    ///         return Execution::Error;
    ///     }
    ///     *element *= 10;
    ///     Execution::Continue
    /// });
    /// assert_eq!(result, Err(ListError::CallbackExecution { index: 2 }));
    /// assert_eq!(Vec::from_iter(list), vec![10, 20, 3]);
    /// ```
    pub fn execute_on_elements_mut<C, F>(&mut self, context: &mut C, mut f: F) -> Result<Completion, ListError>
    where
        C: ?Sized,
        F: FnMut(&mut T, usize, &mut C) -> Execution,
    {
        self.walk(|node, index| {
            // SAFETY: the node is owned by the list, which `&mut self` keeps
            // borrowed exclusively, and the reference ends with the call.
            let element = unsafe { &mut (*node.as_ptr()).element };
            f(element, index, &mut *context)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Completion, Execution};
    use crate::error::ListError;
    use crate::list::{List, Node};

    #[derive(Default)]
    struct FindNode {
        input: i32,
        output_index: Option<usize>,
    }

    #[test]
    fn execute_visits_in_order() {
        let list = List::from_iter([111, 23, 63]);
        let mut seen = Vec::new();
        let result = list.execute_on_elements(&mut seen, |element, node, index, seen| {
            assert_eq!(node.element(), element);
            seen.push((index, *element));
            Execution::Continue
        });
        assert_eq!(result, Ok(Completion::Finished));
        assert_eq!(seen, vec![(0, 111), (1, 23), (2, 63)]);
    }

    #[test]
    fn execute_stop_is_success() {
        let list = List::from_iter([75, 23, 63, 77, 91]);
        let mut params = FindNode {
            input: 77,
            ..FindNode::default()
        };
        let result = list.execute_on_elements(&mut params, |element, _, index, params| {
            if *element == params.input {
                params.output_index = Some(index);
                Execution::Stop
            } else {
                Execution::Continue
            }
        });
        assert_eq!(result, Ok(Completion::Stopped { index: 3 }));
        assert!(result.unwrap().is_stopped());
        assert_eq!(params.output_index, Some(3));
    }

    #[test]
    fn execute_can_capture_nodes() {
        let list = List::from_iter([4, 8, 2]);
        let mut max_node: Option<&Node<i32>> = None;
        list.execute_on_elements(&mut max_node, |element, node, _, max_node| {
            if max_node.map_or(true, |max| element > max.element()) {
                *max_node = Some(node);
            }
            Execution::Continue
        })
        .unwrap();
        assert_eq!(max_node.map(|node| *node.element()), Some(8));
    }

    #[test]
    fn execute_reports_callback_error_index() {
        let mut list = List::from_iter([1, 2, 3, 4]);
        let mut calls = 0;
        let result = list.execute_on_elements_mut(&mut calls, |element, _, calls| {
            *calls += 1;
            if *element == 2 {
                Execution::Error
            } else {
                Execution::Continue
            }
        });
        assert_eq!(result, Err(ListError::CallbackExecution { index: 1 }));
        assert_eq!(calls, 2);
    }

    #[test]
    fn execute_on_empty_list_finishes() {
        let list = List::<i32>::new();
        let result = list.execute_on_elements(&mut (), |_, _, _, _| Execution::Error);
        assert_eq!(result, Ok(Completion::Finished));
    }

    #[test]
    fn execute_detects_broken_chain() {
        let mut list = List::from_iter([1, 2, 3]);
        let orphan = list.sever_after(1);
        let mut visited = Vec::new();
        let result = list.execute_on_elements(&mut visited, |element, _, _, visited| {
            visited.push(*element);
            Execution::Continue
        });
        assert_eq!(result, Err(ListError::BrokenList { index: 2 }));
        assert_eq!(visited, vec![1, 2]);
        unsafe {
            list.traverse_node(1).unwrap().as_mut().next = Some(orphan);
        }
    }
}
