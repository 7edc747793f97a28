use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::render;
use super::timer::IntervalTicker;
use crate::engine::{AuxView, Mutator, PlaybackState, Session, Speed, SpeedProfile};
use crate::layout::Scene;
use crate::validation::ValidationError;

/// A text input shown above the operation buttons.
pub struct Field {
	pub label: &'static str,
	pub placeholder: &'static str,
}

/// One operation button. `build` turns the current field values, in
/// [`Binding::FIELDS`] order, into an operation.
pub struct Action<O> {
	pub label: &'static str,
	pub build: fn(&[String]) -> Result<O, ValidationError>,
}

impl<O> Clone for Action<O> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<O> Copy for Action<O> {}

/// What a page supplies to the shared visualizer: its mutator, its inputs
/// and buttons, and how a snapshot is laid out.
pub trait Binding: 'static {
	type Mutator: Mutator<Snapshot: 'static, Op: 'static> + 'static;

	const TITLE: &'static str;
	const SUMMARY: &'static str;
	const SPEEDS: SpeedProfile;
	const FIELDS: &'static [Field];
	/// Named configurations offered in a selector; the first is the default.
	const VARIANTS: &'static [&'static str] = &[];

	fn actions() -> Vec<Action<OpOf<Self>>>;

	/// Mutator for a variant name. Unknown names give the default.
	fn configure(variant: &str) -> Self::Mutator;

	fn scene(mutator: &Self::Mutator, snapshot: &SnapshotOf<Self>) -> Scene;
}

pub type OpOf<B> = <<B as Binding>::Mutator as Mutator>::Op;
pub type SnapshotOf<B> = <<B as Binding>::Mutator as Mutator>::Snapshot;
type Live<B> = Session<<B as Binding>::Mutator, IntervalTicker>;

/// Copyable handle to a page's session plus the signal views subscribe to.
struct Handle<B: Binding> {
	store: StoredValue<Live<B>, LocalStorage>,
	revision: RwSignal<u64>,
}

impl<B: Binding> Clone for Handle<B> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<B: Binding> Copy for Handle<B> {}

impl<B: Binding> Handle<B> {
	fn update(self, f: impl FnOnce(&mut Live<B>)) {
		let revision = self.store.try_update_value(|session| {
			f(session);
			session.revision()
		});
		// Only a real change wakes the views.
		if let Some(revision) = revision {
			if revision != self.revision.get_untracked() {
				self.revision.set(revision);
			}
		}
	}

	/// Read the session and subscribe the caller to later changes.
	fn read<U>(self, f: impl FnOnce(&Live<B>) -> U) -> Option<U> {
		self.revision.track();
		self.store.try_with_value(f)
	}
}

/// Field value `index`, empty when the page has fewer fields.
pub fn input(values: &[String], index: usize) -> &str {
	values.get(index).map_or("", String::as_str)
}

fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn distance(d: Option<u64>) -> String {
	d.map_or_else(|| "\u{221e}".to_string(), |d| d.to_string())
}

fn chips(title: &'static str, items: Vec<String>) -> AnyView {
	view! {
		<div class="aux">
			<span class="aux-title">{title}</span>
			{items.into_iter().map(|item| view! { <span class="chip">{item}</span> }).collect_view()}
		</div>
	}
	.into_any()
}

fn aux_view(aux: AuxView) -> AnyView {
	match aux {
		AuxView::Stack(items) => chips("Stack, bottom to top", items),
		AuxView::Queue(items) => chips("Queue, front to rear", items),
		AuxView::Components(groups) => chips(
			"Components",
			groups.into_iter().map(|g| format!("{{{}}}", g.join(", "))).collect(),
		),
		AuxView::EdgeSet(edges) => {
			view! { <p class="aux">{format!("Edges in the tree: {}", edges.len())}</p> }.into_any()
		}
		AuxView::Distances(rows) => view! {
			<table class="aux-table">
				<tr>{rows.iter().map(|(label, _)| view! { <th>{label.clone()}</th> }).collect_view()}</tr>
				<tr>{rows.iter().map(|(_, d)| view! { <td>{distance(*d)}</td> }).collect_view()}</tr>
			</table>
		}
		.into_any(),
		AuxView::Matrix { labels, cells } => view! {
			<table class="aux-table">
				<tr>
					<th></th>
					{labels.iter().map(|label| view! { <th>{label.clone()}</th> }).collect_view()}
				</tr>
				{labels
					.into_iter()
					.zip(cells)
					.map(|(label, row)| {
						view! {
							<tr>
								<th>{label}</th>
								{row.into_iter().map(|d| view! { <td>{distance(d)}</td> }).collect_view()}
							</tr>
						}
					})
					.collect_view()}
			</table>
		}
		.into_any(),
	}
}

/// Full visualization page for one structure: inputs, operation buttons,
/// canvas, playback bar, narration and console.
pub fn visualizer<B: Binding>() -> impl IntoView {
	let variant = B::VARIANTS.first().copied().unwrap_or_default();
	let session: Live<B> = Session::new(B::configure(variant), IntervalTicker::new(), B::SPEEDS);
	let handle = Handle::<B> {
		store: StoredValue::new_local(session),
		revision: RwSignal::new(0),
	};
	handle.store.update_value(|session| {
		session
			.playback_mut()
			.ticker_mut()
			.bind(move || handle.update(Session::tick));
	});
	handle.update(Session::populate_sample);
	on_cleanup(move || {
		handle.store.try_update_value(|session| session.playback_mut().pause());
	});

	let inputs: Vec<RwSignal<String>> = B::FIELDS.iter().map(|_| RwSignal::new(String::new())).collect();
	let run = move |action: Action<OpOf<B>>, values: Vec<String>| {
		let mut rejected = None;
		handle.update(|session| rejected = session.try_run((action.build)(&values)).err());
		if let Some(err) = rejected {
			warn!("{}: {err}", action.label);
			alert(&err.to_string());
		}
	};

	let fields = B::FIELDS
		.iter()
		.zip(inputs.iter().copied())
		.map(|(field, value)| {
			view! {
				<label class="field">
					<span>{field.label}</span>
					<input
						type="text"
						placeholder=field.placeholder
						prop:value=move || value.get()
						on:input=move |ev| value.set(event_target_value(&ev))
					/>
				</label>
			}
		})
		.collect_view();

	let actions = B::actions()
		.into_iter()
		.map(|action| {
			let inputs = inputs.clone();
			view! {
				<button
					class="action"
					on:click=move |_| run(action, inputs.iter().map(|s| s.get_untracked()).collect())
				>
					{action.label}
				</button>
			}
		})
		.collect_view();

	let variants = (!B::VARIANTS.is_empty()).then(|| {
		view! {
			<select
				class="variant"
				on:change=move |ev| {
					let name = event_target_value(&ev);
					handle.update(|session| session.reconfigure(B::configure(&name)));
				}
			>
				{B::VARIANTS.iter().map(|v| view! { <option value={*v}>{*v}</option> }).collect_view()}
			</select>
		}
	});

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		handle.read(|session| {
			let scene = B::scene(session.mutator(), session.snapshot());
			render::fit_canvas(&canvas, &scene);
			match context_2d(&canvas) {
				Some(ctx) => render::render(&scene, session.highlight(), &ctx),
				None => warn!("2d canvas context unavailable"),
			}
		});
	});

	let state = move || {
		handle
			.read(|s| s.playback().state())
			.unwrap_or(PlaybackState::Idle)
	};
	let position = move || {
		handle
			.read(|s| {
				let playback = s.playback();
				match playback.position() {
					Some(p) => format!("Step {} of {}", p + 1, playback.len()),
					None if playback.is_empty() => "No steps".to_string(),
					None => format!("{} steps ready", playback.len()),
				}
			})
			.unwrap_or_default()
	};
	let description = move || {
		handle
			.read(|s| s.highlight().description.clone())
			.flatten()
			.unwrap_or_else(|| "Run an operation, then play it back step by step.".to_string())
	};
	let aux = move || {
		handle
			.read(|s| s.highlight().aux.clone())
			.flatten()
			.map(aux_view)
	};
	let console = move || {
		handle
			.read(|s| s.console().lines().to_vec())
			.unwrap_or_default()
			.into_iter()
			.map(|line| view! { <li class=line.level.class()>{line.text}</li> })
			.collect_view()
	};

	view! {
		<Title text=B::TITLE />
		<main class="visualizer">
			<header>
				<A href="/">"All structures"</A>
				<h1>{B::TITLE}</h1>
				<p class="subtitle">{B::SUMMARY}</p>
			</header>

			<section class="controls">
				<div class="fields">{fields}</div>
				<div class="actions">{actions}</div>
				<div class="utility">
					{variants}
					<button on:click=move |_| handle.update(Session::populate_sample)>"Sample data"</button>
					<button on:click=move |_| handle.update(Session::clear)>"Clear"</button>
				</div>
			</section>

			<canvas node_ref=canvas_ref class="structure-canvas" style="display: block;" />

			<section class="playback">
				<button
					on:click=move |_| handle.update(|s| s.playback_mut().reset())
					disabled=move || state() == PlaybackState::Idle
				>
					"Reset"
				</button>
				<button
					on:click=move |_| handle.update(|s| {
						s.playback_mut().step_backward();
					})
					disabled=move || !handle.read(|s| s.playback().can_step_backward()).unwrap_or(false)
				>
					"Step back"
				</button>
				<button
					on:click=move |_| handle.update(|s| {
						s.playback_mut().play();
					})
					disabled=move || {
						state() == PlaybackState::Playing
							|| !handle.read(|s| s.playback().can_step_forward()).unwrap_or(false)
					}
				>
					"Play"
				</button>
				<button
					on:click=move |_| handle.update(|s| s.playback_mut().pause())
					disabled=move || state() != PlaybackState::Playing
				>
					"Pause"
				</button>
				<button
					on:click=move |_| handle.update(|s| {
						s.playback_mut().step_forward();
					})
					disabled=move || !handle.read(|s| s.playback().can_step_forward()).unwrap_or(false)
				>
					"Step forward"
				</button>
				<select on:change=move |ev| {
					if let Some(speed) = Speed::from_label(&event_target_value(&ev)) {
						handle.update(|s| s.playback_mut().set_speed(speed));
					}
				}>
					{Speed::ALL
						.into_iter()
						.map(|speed| {
							view! {
								<option value=speed.label() selected={speed == Speed::default()}>
									{speed.label()}
								</option>
							}
						})
						.collect_view()}
				</select>
				<span class="position">{position}</span>
			</section>

			<section class="narration">
				<p class="step-description">{description}</p>
				{aux}
			</section>

			<section class="console">
				<header>
					<h2>"Console"</h2>
					<button on:click=move |_| handle.update(Session::clear_console)>"Clear console"</button>
				</header>
				<ul>{console}</ul>
			</section>
		</main>
	}
}
