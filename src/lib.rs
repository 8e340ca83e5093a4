//! This crate provides a singly-linked list with owned nodes, which tracks both
//! its first and its last node.
//!
//! The [`List`] appends and inserts at the front in constant time. In
//! compromise, accessing, inserting or removing at any other position takes
//! *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use singly_list::List;
//!
//! let mut list = List::new();
//! list.insert_element_at_index(111, 0).unwrap();
//! list.append_element(75).unwrap();
//! list.append_element(23).unwrap();
//! list.append_element(63).unwrap();
//! assert_eq!(list, List::from_iter([111, 75, 23, 63]));
//!
//! list.delete_node_at_index(1).unwrap();
//! assert_eq!(list, List::from_iter([111, 23, 63]));
//! assert_eq!(list.calculate_length(), Ok(3));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!    ╔═══════════╗           ╔═══════════╗                        ╔═══════════╗
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ ║   next    ║ ──→ ∅
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ╟───────────╢
//!    ║ element T ║           ║ element T ║                        ║ element T ║
//!    ╚═══════════╝           ╚═══════════╝                        ╚═══════════╝
//!      Node 0  ↑                 Node 1                             Node N-1 ↑
//!              │                                                             │
//! ╔═══════════╗│                                                             │
//! ║   head    ║┘                                                             │
//! ╟───────────╢                                                              │
//! ║   tail    ║ ─────────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `head` to the first node and a pointer `tail` to the last node,
//!   both empty in an empty list;
//! - a length field `len` indicating the length of the list. It can be disabled by
//!   disabling the `length` feature in your `Cargo.toml`:
//! ```text
//! [dependencies]
//! singly_list = { default-features = false }
//! ```
//!
//! Each node of the list `List<T>` is allocated on heap, and is owned by the
//! list until it is removed. A [`Node`] outside any list is a plain
//! `Box<Node<T>>`, which can be moved into a list with
//! [`List::append_node`] or [`List::insert_node_at_index`] and comes back out
//! of [`List::remove_node_at_index`].
//!
//! # Indexed Access
//!
//! Every indexed operation resolves its position with the same forward walk
//! ([`List::traverse_to_index`]), which tells two failures apart:
//! - [`ListError::IndexOutOfBounds`]: the walk stepped past the tail;
//! - [`ListError::BrokenList`]: a link was missing before the tail was
//!   reached, meaning the list is corrupted.
//!
//! Operations built on the walk forward its error unchanged, so the same
//! boundary yields the same error from every entry point.
//!
//! ```
//! use singly_list::{List, ListError};
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! assert_eq!(
//!     list.traverse_to_index(3).err(),
//!     Some(ListError::IndexOutOfBounds { index: 3, len: 3 })
//! );
//! assert_eq!(
//!     list.split_off(5).err(),
//!     Some(ListError::IndexOutOfBounds { index: 5, len: 3 })
//! );
//! ```
//!
//! # Searching
//!
//! [`List::search`] returns a [`Search`] session that remembers where its
//! last match was, so every occurrence can be visited in turn:
//!
//! ```
//! use singly_list::List;
//!
//! let list = List::from_iter([75, 23, 63, 77, 91, 77]);
//! let hits = Vec::from_iter(list.search(&77, |a, b| a == b).map(|found| found.index));
//! assert_eq!(hits, vec![3, 5]);
//! ```
//!
//! # Bulk Execution
//!
//! [`List::execute_on_elements`] runs a callback over the elements in order.
//! The callback steers the scan with [`Execution`]:
//!
//! ```
//! use singly_list::{Completion, Execution, List};
//!
//! let list = List::from_iter([5, 7, 9]);
//! let mut sum = 0;
//! let result = list.execute_on_elements(&mut sum, |element, _, _, sum| {
//!     *sum += element;
//!     if *sum > 10 { Execution::Stop } else { Execution::Continue }
//! });
//! assert_eq!(result, Ok(Completion::Stopped { index: 1 }));
//! assert_eq!(sum, 12);
//! ```

#[doc(inline)]
pub use error::{AllocError, ListError};
#[doc(inline)]
pub use list::algorithms::{Completion, Execution};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::search::{Match, Search};
#[doc(inline)]
pub use list::{List, Node, NodeMut};

pub mod error;
pub mod list;
