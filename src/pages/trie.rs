use leptos::prelude::*;

use crate::components::visualizer::{Action, Binding, Field, input, visualizer};
use crate::engine::SpeedProfile;
use crate::layout::{self, Scene};
use crate::structures::{Trie, TrieMutator, TrieOp};
use crate::validation::parse_word;

struct TrieBinding;

impl Binding for TrieBinding {
	type Mutator = TrieMutator;

	const TITLE: &'static str = "Trie";
	const SUMMARY: &'static str = "Words share prefixes. Ringed nodes end a stored word.";
	const SPEEDS: SpeedProfile = SpeedProfile::new(1200, 800, 400);
	const FIELDS: &'static [Field] = &[Field {
		label: "Word",
		placeholder: "letters only, e.g. card",
	}];

	fn actions() -> Vec<Action<TrieOp>> {
		vec![
			Action {
				label: "Insert",
				build: |v| parse_word(input(v, 0)).map(TrieOp::Insert),
			},
			Action {
				label: "Search",
				build: |v| parse_word(input(v, 0)).map(TrieOp::Search),
			},
			Action {
				label: "Starts with",
				build: |v| parse_word(input(v, 0)).map(TrieOp::StartsWith),
			},
			Action {
				label: "Delete",
				build: |v| parse_word(input(v, 0)).map(TrieOp::Delete),
			},
		]
	}

	fn configure(_: &str) -> TrieMutator {
		TrieMutator
	}

	fn scene(_: &TrieMutator, trie: &Trie) -> Scene {
		layout::trie(trie)
	}
}

/// Trie visualizer.
#[component]
pub fn TriePage() -> impl IntoView {
	visualizer::<TrieBinding>()
}
