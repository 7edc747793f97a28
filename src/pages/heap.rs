use leptos::prelude::*;

use crate::components::visualizer::{Action, Binding, Field, input, visualizer};
use crate::engine::SpeedProfile;
use crate::layout::{self, Scene};
use crate::structures::{Heap, HeapKind, HeapMutator, HeapOp};
use crate::validation::parse_value;

struct HeapBinding;

impl Binding for HeapBinding {
	type Mutator = HeapMutator;

	const TITLE: &'static str = "Binary Heap";
	const SUMMARY: &'static str = "A complete tree stored in an array; the root is the minimum or maximum.";
	const SPEEDS: SpeedProfile = SpeedProfile::new(1500, 1000, 500);
	const FIELDS: &'static [Field] = &[Field {
		label: "Value",
		placeholder: "e.g. 17",
	}];
	const VARIANTS: &'static [&'static str] = &["Min-heap", "Max-heap"];

	fn actions() -> Vec<Action<HeapOp>> {
		vec![
			Action {
				label: "Insert",
				build: |v| parse_value(input(v, 0)).map(HeapOp::Insert),
			},
			Action {
				label: "Extract root",
				build: |_| Ok(HeapOp::Extract),
			},
			Action {
				label: "Peek",
				build: |_| Ok(HeapOp::Peek),
			},
		]
	}

	fn configure(variant: &str) -> HeapMutator {
		match variant {
			"Max-heap" => HeapMutator::new(HeapKind::Max),
			_ => HeapMutator::new(HeapKind::Min),
		}
	}

	fn scene(_: &HeapMutator, heap: &Heap) -> Scene {
		layout::heap(heap)
	}
}

/// Min/max heap visualizer.
#[component]
pub fn HeapPage() -> impl IntoView {
	visualizer::<HeapBinding>()
}
