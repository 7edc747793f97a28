//! Hash set with separate chaining over a fixed number of buckets.

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::{Arena, ElementId, IdSource, Mutation, Mutator, StepKind, StepRecorder};

/// Hash set snapshot: bucket chains of entry ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashTable {
	buckets: Vec<Vec<ElementId>>,
	entries: BTreeMap<ElementId, i64>,
}

impl HashTable {
	/// Empty table with `count` buckets.
	pub fn with_buckets(count: usize) -> Self {
		Self {
			buckets: vec![Vec::new(); count],
			entries: BTreeMap::new(),
		}
	}

	/// Number of buckets.
	pub fn bucket_count(&self) -> usize {
		self.buckets.len()
	}

	/// Chain of one bucket in insertion order.
	pub fn chain(&self, bucket: usize) -> &[ElementId] {
		self.buckets.get(bucket).map_or(&[], Vec::as_slice)
	}

	/// Value of entry `id`.
	pub fn value(&self, id: ElementId) -> Option<i64> {
		self.entries.get(&id).copied()
	}

	/// Values of one bucket in insertion order.
	pub fn chain_values(&self, bucket: usize) -> Vec<i64> {
		self.chain(bucket)
			.iter()
			.filter_map(|id| self.value(*id))
			.collect()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the set is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Whether `value` is stored.
	pub fn contains(&self, value: i64) -> bool {
		self.entries.values().any(|v| *v == value)
	}

	/// Entries per bucket.
	pub fn load_factor(&self) -> f64 {
		if self.buckets.is_empty() {
			return 0.0;
		}
		self.len() as f64 / self.buckets.len() as f64
	}
}

impl Arena for HashTable {
	fn resolves(&self, id: ElementId) -> bool {
		self.entries.contains_key(&id)
	}
}

/// Hash set operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashOp {
	/// Add a value; duplicates are rejected.
	Insert(i64),
	/// Remove a value.
	Remove(i64),
	/// Membership test.
	Contains(i64),
}

impl fmt::Display for HashOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			HashOp::Insert(v) => write!(f, "Insert {v}"),
			HashOp::Remove(v) => write!(f, "Remove {v}"),
			HashOp::Contains(v) => write!(f, "Contains {v}"),
		}
	}
}

/// Bucket count of a hash set. Never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashSetConfig {
	buckets: usize,
}

impl Default for HashSetConfig {
	fn default() -> Self {
		Self { buckets: 10 }
	}
}

impl HashSetConfig {
	/// `None` for a zero bucket count.
	pub fn new(buckets: usize) -> Option<Self> {
		(buckets > 0).then_some(Self { buckets })
	}

	/// Number of buckets.
	pub fn buckets(&self) -> usize {
		self.buckets
	}

	/// `|value| mod buckets`.
	pub fn hash(&self, value: i64) -> usize {
		(value.unsigned_abs() % self.buckets as u64) as usize
	}

	/// Record the hash and scan the chain. Returns the bucket and the
	/// matching entry, if any.
	fn locate(&self, table: &HashTable, value: i64, rec: &mut StepRecorder) -> (usize, Option<ElementId>) {
		let bucket = self.hash(value);
		rec.note(
			StepKind::Hash,
			format!(
				"hash({value}) = |{value}| mod {} = {bucket}",
				self.buckets
			),
		);
		for id in table.chain(bucket) {
			let Some(entry) = table.value(*id) else {
				continue;
			};
			if entry == value {
				return (bucket, Some(*id));
			}
			rec.focus(
				StepKind::Compare,
				*id,
				format!("Bucket {bucket}: {entry} != {value}"),
			);
		}
		(bucket, None)
	}
}

impl Mutator for HashSetConfig {
	type Snapshot = HashTable;
	type Op = HashOp;

	fn apply(&self, table: &HashTable, op: &HashOp, ids: &mut dyn IdSource) -> Mutation<HashTable> {
		let mut rec = StepRecorder::new();
		if table.bucket_count() != self.buckets {
			rec.note(
				StepKind::Info,
				format!(
					"The table has {} buckets, not {}; clear it first",
					table.bucket_count(),
					self.buckets
				),
			);
			return Mutation::new(table.clone(), rec.finish("Nothing to do"));
		}
		let next = match *op {
			HashOp::Insert(value) => match self.locate(&table, value, &mut rec) {
				(_, Some(existing)) => {
					rec.focus(
						StepKind::Duplicate,
						existing,
						format!("{value} is already in the set"),
					);
					None
				}
				(bucket, None) => {
					let mut next = table.clone();
					let chain_len = next.chain(bucket).len();
					if chain_len > 0 {
						rec.note(
							StepKind::Collision,
							format!(
								"Collision: bucket {bucket} already holds {chain_len} entr{}, chain {value} at the end",
								if chain_len == 1 { "y" } else { "ies" }
							),
						);
					}
					let id = ids.next_id();
					next.entries.insert(id, value);
					if let Some(chain) = next.buckets.get_mut(bucket) {
						chain.push(id);
					}
					rec.focus(
						StepKind::Insert,
						id,
						format!(
							"Inserted {value} into bucket {bucket} (load factor {:.2})",
							next.load_factor()
						),
					);
					Some(next)
				}
			},
			HashOp::Remove(value) => match self.locate(&table, value, &mut rec) {
				(bucket, Some(id)) => {
					rec.focus(StepKind::Found, id, format!("Found {value} in bucket {bucket}"));
					let mut next = table.clone();
					next.entries.remove(&id);
					if let Some(chain) = next.buckets.get_mut(bucket) {
						chain.retain(|e| *e != id);
					}
					rec.focus(StepKind::Remove, id, format!("Removed {value}"));
					Some(next)
				}
				(bucket, None) => {
					rec.note(
						StepKind::NotFound,
						format!("{value} is not in bucket {bucket}"),
					);
					None
				}
			},
			HashOp::Contains(value) => {
				match self.locate(&table, value, &mut rec) {
					(bucket, Some(id)) => {
						rec.focus(StepKind::Found, id, format!("{value} found in bucket {bucket}"))
					}
					(_, None) => rec.note(StepKind::NotFound, format!("{value} is not in the set")),
				}
				None
			}
		};
		Mutation::new(next.unwrap_or_else(|| table.clone()), rec.finish("Nothing to do"))
	}

	fn empty(&self) -> HashTable {
		HashTable::with_buckets(self.buckets)
	}

	fn sample(&self) -> Vec<HashOp> {
		[5, 15, 23, 42, 8].into_iter().map(HashOp::Insert).collect()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::CounterIds;

	#[test]
	fn hash_is_absolute_value_mod_buckets() {
		let cfg = HashSetConfig::default();
		assert_eq!(cfg.hash(15), 5);
		assert_eq!(cfg.hash(-15), 5);
		assert_eq!(cfg.hash(0), 0);
		assert_eq!(cfg.hash(i64::MIN), 8);
	}

	#[test]
	fn collisions_chain_in_insertion_order() {
		let cfg = HashSetConfig::default();
		let mut ids = CounterIds::new();
		let first = cfg.apply(&cfg.empty(), &HashOp::Insert(5), &mut ids);
		assert!(first.steps.iter().all(|s| s.kind != StepKind::Collision));

		let second = cfg.apply(&first.snapshot, &HashOp::Insert(15), &mut ids);
		assert_eq!(second.snapshot.chain_values(5), vec![5, 15]);
		assert!(second.steps.iter().any(|s| s.kind == StepKind::Collision));
	}

	#[test]
	fn duplicate_remove_and_contains() {
		let cfg = HashSetConfig::default();
		let mut ids = CounterIds::new();
		let mut table = cfg.empty();
		for v in [5, 15, 25] {
			table = cfg.apply(&table, &HashOp::Insert(v), &mut ids).snapshot;
		}
		let dup = cfg.apply(&table, &HashOp::Insert(15), &mut ids);
		assert_eq!(dup.snapshot, table);
		assert_eq!(dup.steps.last().unwrap().kind, StepKind::Duplicate);

		let removed = cfg.apply(&table, &HashOp::Remove(15), &mut ids).snapshot;
		assert_eq!(removed.chain_values(5), vec![5, 25]);

		let lookup = cfg.apply(&removed, &HashOp::Contains(25), &mut ids);
		let kinds: Vec<_> = lookup.steps.iter().map(|s| s.kind).collect();
		assert_eq!(kinds, vec![StepKind::Hash, StepKind::Compare, StepKind::Found]);

		let missing = cfg.apply(&removed, &HashOp::Remove(35), &mut ids);
		assert_eq!(missing.steps.last().unwrap().kind, StepKind::NotFound);
	}

	#[test]
	fn zero_buckets_are_rejected() {
		assert_eq!(HashSetConfig::new(0), None);
		assert_eq!(HashSetConfig::new(7).map(|c| c.buckets()), Some(7));
	}

	#[test]
	fn mismatched_table_is_left_untouched() {
		let cfg = HashSetConfig::default();
		let mut ids = CounterIds::new();
		let unsized_table = HashTable::default();
		for op in [HashOp::Contains(3), HashOp::Remove(3), HashOp::Insert(3)] {
			let out = cfg.apply(&unsized_table, &op, &mut ids);
			assert_eq!(out.snapshot, unsized_table);
			assert_eq!(out.steps.len(), 1);
			assert_eq!(out.steps.last().unwrap().kind, StepKind::Info);
		}

		let sized = cfg.empty();
		let out = cfg.apply(&sized, &HashOp::Contains(3), &mut ids);
		assert_eq!(out.snapshot, sized);
		assert_eq!(out.snapshot.bucket_count(), 10);
	}
}
