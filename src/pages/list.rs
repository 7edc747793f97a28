use leptos::prelude::*;

use crate::components::visualizer::{Action, Binding, Field, input, visualizer};
use crate::engine::SpeedProfile;
use crate::layout::{self, Scene};
use crate::structures::{LinkedList, ListMutator, ListOp};
use crate::validation::{parse_index, parse_value};

struct ListBinding;

impl Binding for ListBinding {
	type Mutator = ListMutator;

	const TITLE: &'static str = "Singly Linked List";
	const SUMMARY: &'static str = "Each node points at the next one; the last points at null.";
	const SPEEDS: SpeedProfile = SpeedProfile::new(1200, 800, 400);
	const FIELDS: &'static [Field] = &[
		Field {
			label: "Value",
			placeholder: "e.g. 25",
		},
		Field {
			label: "Position",
			placeholder: "0 is the head",
		},
	];

	fn actions() -> Vec<Action<ListOp>> {
		vec![
			Action {
				label: "Insert at head",
				build: |v| parse_value(input(v, 0)).map(ListOp::InsertHead),
			},
			Action {
				label: "Insert at tail",
				build: |v| parse_value(input(v, 0)).map(ListOp::InsertTail),
			},
			Action {
				label: "Insert at position",
				build: |v| {
					Ok(ListOp::InsertAt {
						index: parse_index(input(v, 1))?,
						value: parse_value(input(v, 0))?,
					})
				},
			},
			Action {
				label: "Delete",
				build: |v| parse_value(input(v, 0)).map(ListOp::Delete),
			},
			Action {
				label: "Search",
				build: |v| parse_value(input(v, 0)).map(ListOp::Search),
			},
			Action {
				label: "Traverse",
				build: |_| Ok(ListOp::Traverse),
			},
			Action {
				label: "Reverse",
				build: |_| Ok(ListOp::Reverse),
			},
		]
	}

	fn configure(_: &str) -> ListMutator {
		ListMutator
	}

	fn scene(_: &ListMutator, list: &LinkedList) -> Scene {
		layout::linked_list(list)
	}
}

/// Linked list visualizer.
#[component]
pub fn ListPage() -> impl IntoView {
	visualizer::<ListBinding>()
}
