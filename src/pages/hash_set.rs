use leptos::prelude::*;

use crate::components::visualizer::{Action, Binding, Field, input, visualizer};
use crate::engine::SpeedProfile;
use crate::layout::{self, Scene};
use crate::structures::{HashOp, HashSetConfig, HashTable};
use crate::validation::parse_value;

struct HashSetBinding;

impl Binding for HashSetBinding {
	type Mutator = HashSetConfig;

	const TITLE: &'static str = "Hash Set";
	const SUMMARY: &'static str = "hash(n) = |n| mod 10, with collisions chained per bucket.";
	const SPEEDS: SpeedProfile = SpeedProfile::new(1200, 800, 400);
	const FIELDS: &'static [Field] = &[Field {
		label: "Value",
		placeholder: "e.g. 35",
	}];

	fn actions() -> Vec<Action<HashOp>> {
		vec![
			Action {
				label: "Insert",
				build: |v| parse_value(input(v, 0)).map(HashOp::Insert),
			},
			Action {
				label: "Remove",
				build: |v| parse_value(input(v, 0)).map(HashOp::Remove),
			},
			Action {
				label: "Contains",
				build: |v| parse_value(input(v, 0)).map(HashOp::Contains),
			},
		]
	}

	fn configure(_: &str) -> HashSetConfig {
		HashSetConfig::default()
	}

	fn scene(_: &HashSetConfig, table: &HashTable) -> Scene {
		layout::hash_table(table)
	}
}

/// Hash set visualizer.
#[component]
pub fn HashSetPage() -> impl IntoView {
	visualizer::<HashSetBinding>()
}
