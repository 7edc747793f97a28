//! One mutator per visualized data structure.

pub mod bst;
pub mod graph;
pub mod hash_set;
pub mod heap;
pub mod linked_list;
pub mod queue;
pub mod stack;
pub mod trie;

pub use bst::{BstMutator, TraversalOrder, Tree, TreeNode, TreeOp};
pub use graph::{Graph, GraphConfig, GraphEdge, GraphNode, GraphOp};
pub use hash_set::{HashOp, HashSetConfig, HashTable};
pub use heap::{Heap, HeapKind, HeapMutator, HeapOp};
pub use linked_list::{LinkedList, ListMutator, ListNode, ListOp};
pub use queue::{Queue, QueueConfig, QueueOp};
pub use stack::{Slot, Stack, StackConfig, StackOp};
pub use trie::{Trie, TrieMutator, TrieNode, TrieOp};
