use std::alloc::Layout;

use derive_more::{Display, Error, From, IsVariant};

/// The global allocator could not provide storage for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("memory allocation of {} bytes failed", layout.size())]
pub struct AllocError {
    layout: Layout,
}

impl AllocError {
    pub(crate) fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// The layout of the allocation request that failed.
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

/// Errors reported by the operations of a [`List`](crate::List).
///
/// Traversal classifies a failure exactly once, and every operation built on
/// top of it forwards that classification unchanged. The same boundary
/// condition therefore yields the same variant whichever entry point hit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, IsVariant)]
pub enum ListError {
    /// Storage for a new node could not be obtained.
    #[display("failed to create a node: {_0}")]
    #[from]
    NodeCreation(AllocError),
    /// The requested index is not smaller than the number of nodes.
    #[display("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// A link was missing before the recorded tail was reached. `index` is the
    /// position where the missing node was expected.
    #[display("list is broken: no node at index {index} before the tail")]
    BrokenList { index: usize },
    /// The list has fewer nodes than the operation needs.
    #[display("list of length {len} is too small, at least {required} nodes are required")]
    ListTooSmall { len: usize, required: usize },
    /// A caller supplied callback reported failure on the element at `index`.
    #[display("callback failed on the element at index {index}")]
    CallbackExecution { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_error_converts_into_node_creation() {
        let layout = Layout::new::<[u64; 4]>();
        let err: ListError = AllocError::new(layout).into();
        assert!(err.is_node_creation());
        assert_eq!(err, ListError::NodeCreation(AllocError::new(layout)));
        assert_eq!(
            err.to_string(),
            "failed to create a node: memory allocation of 32 bytes failed"
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            ListError::IndexOutOfBounds { index: 7, len: 3 }.to_string(),
            "index 7 is out of bounds for a list of length 3"
        );
        assert_eq!(
            ListError::BrokenList { index: 2 }.to_string(),
            "list is broken: no node at index 2 before the tail"
        );
        assert_eq!(
            ListError::ListTooSmall { len: 1, required: 2 }.to_string(),
            "list of length 1 is too small, at least 2 nodes are required"
        );
        assert!(ListError::CallbackExecution { index: 0 }.is_callback_execution());
    }
}
