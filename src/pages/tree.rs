use leptos::prelude::*;

use crate::components::visualizer::{Action, Binding, Field, input, visualizer};
use crate::engine::SpeedProfile;
use crate::layout::{self, Scene};
use crate::structures::{BstMutator, TraversalOrder, Tree, TreeOp};
use crate::validation::parse_value;

struct TreeBinding;

impl Binding for TreeBinding {
	type Mutator = BstMutator;

	const TITLE: &'static str = "Binary Search Tree";
	const SUMMARY: &'static str = "Smaller values go left, larger go right. Duplicates are rejected.";
	const SPEEDS: SpeedProfile = SpeedProfile::new(1500, 1000, 500);
	const FIELDS: &'static [Field] = &[Field {
		label: "Value",
		placeholder: "e.g. 45",
	}];

	fn actions() -> Vec<Action<TreeOp>> {
		vec![
			Action {
				label: "Insert",
				build: |v| parse_value(input(v, 0)).map(TreeOp::Insert),
			},
			Action {
				label: "Delete",
				build: |v| parse_value(input(v, 0)).map(TreeOp::Delete),
			},
			Action {
				label: "Search",
				build: |v| parse_value(input(v, 0)).map(TreeOp::Search),
			},
			Action {
				label: "Min",
				build: |_| Ok(TreeOp::Min),
			},
			Action {
				label: "Max",
				build: |_| Ok(TreeOp::Max),
			},
			Action {
				label: "In-order",
				build: |_| Ok(TreeOp::Traverse(TraversalOrder::InOrder)),
			},
			Action {
				label: "Pre-order",
				build: |_| Ok(TreeOp::Traverse(TraversalOrder::PreOrder)),
			},
			Action {
				label: "Post-order",
				build: |_| Ok(TreeOp::Traverse(TraversalOrder::PostOrder)),
			},
			Action {
				label: "Level-order",
				build: |_| Ok(TreeOp::Traverse(TraversalOrder::LevelOrder)),
			},
		]
	}

	fn configure(_: &str) -> BstMutator {
		BstMutator
	}

	fn scene(_: &BstMutator, tree: &Tree) -> Scene {
		layout::tree(tree)
	}
}

/// Binary search tree visualizer.
#[component]
pub fn TreePage() -> impl IntoView {
	visualizer::<TreeBinding>()
}
