pub mod graph;
pub mod hash_set;
pub mod heap;
pub mod home;
pub mod list;
pub mod not_found;
pub mod queue;
pub mod stack;
pub mod tree;
pub mod trie;
