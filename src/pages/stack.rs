use leptos::prelude::*;

use crate::components::visualizer::{Action, Binding, Field, input, visualizer};
use crate::engine::SpeedProfile;
use crate::layout::{self, Scene};
use crate::structures::{Stack, StackConfig, StackOp};
use crate::validation::parse_value;

struct StackBinding;

impl Binding for StackBinding {
	type Mutator = StackConfig;

	const TITLE: &'static str = "Stack";
	const SUMMARY: &'static str = "Last in, first out. Pushing onto a full stack overflows.";
	const SPEEDS: SpeedProfile = SpeedProfile::new(1000, 700, 350);
	const FIELDS: &'static [Field] = &[Field {
		label: "Value",
		placeholder: "e.g. 9",
	}];

	fn actions() -> Vec<Action<StackOp>> {
		vec![
			Action {
				label: "Push",
				build: |v| parse_value(input(v, 0)).map(StackOp::Push),
			},
			Action {
				label: "Pop",
				build: |_| Ok(StackOp::Pop),
			},
			Action {
				label: "Peek",
				build: |_| Ok(StackOp::Peek),
			},
		]
	}

	fn configure(_: &str) -> StackConfig {
		StackConfig::default()
	}

	fn scene(config: &StackConfig, stack: &Stack) -> Scene {
		layout::stack(stack, config.capacity)
	}
}

/// Stack visualizer.
#[component]
pub fn StackPage() -> impl IntoView {
	visualizer::<StackBinding>()
}
