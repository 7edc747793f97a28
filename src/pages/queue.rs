use leptos::prelude::*;

use crate::components::visualizer::{Action, Binding, Field, input, visualizer};
use crate::engine::SpeedProfile;
use crate::layout::{self, Scene};
use crate::structures::{Queue, QueueConfig, QueueOp};
use crate::validation::parse_value;

struct QueueBinding;

impl Binding for QueueBinding {
	type Mutator = QueueConfig;

	const TITLE: &'static str = "Queue";
	const SUMMARY: &'static str = "First in, first out. Enqueue at the rear, dequeue from the front.";
	const SPEEDS: SpeedProfile = SpeedProfile::new(1000, 700, 350);
	const FIELDS: &'static [Field] = &[Field {
		label: "Value",
		placeholder: "e.g. 11",
	}];

	fn actions() -> Vec<Action<QueueOp>> {
		vec![
			Action {
				label: "Enqueue",
				build: |v| parse_value(input(v, 0)).map(QueueOp::Enqueue),
			},
			Action {
				label: "Dequeue",
				build: |_| Ok(QueueOp::Dequeue),
			},
			Action {
				label: "Front",
				build: |_| Ok(QueueOp::Front),
			},
		]
	}

	fn configure(_: &str) -> QueueConfig {
		QueueConfig::default()
	}

	fn scene(config: &QueueConfig, queue: &Queue) -> Scene {
		layout::queue(queue, config.capacity)
	}
}

/// Queue visualizer.
#[component]
pub fn QueuePage() -> impl IntoView {
	visualizer::<QueueBinding>()
}
