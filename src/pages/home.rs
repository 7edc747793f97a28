use leptos::prelude::*;
use leptos_router::components::A;

/// `(route, title, blurb)` for every visualization.
const VISUALIZATIONS: &[(&str, &str, &str)] = &[
	("/tree", "Binary Search Tree", "Insert, delete, search and four traversals."),
	("/list", "Linked List", "Head, tail and positional inserts, search, reverse."),
	("/stack", "Stack", "Push, pop and peek with a bounded capacity."),
	("/queue", "Queue", "Enqueue, dequeue and front with a bounded capacity."),
	("/hash-set", "Hash Set", "Modulo hashing with separate chaining."),
	("/heap", "Binary Heap", "Min or max heap with sift-up and sift-down."),
	("/trie", "Trie", "Prefix tree with word and prefix lookups."),
	("/graph", "Graph", "BFS, DFS, Dijkstra, Prim, Boruvka and Floyd-Warshall."),
];

/// Index of all visualizations.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<main class="home">
			<div class="graph-overlay">
				<h1>"Data Structure Visualizer"</h1>
				<p class="subtitle">
					"Every operation is narrated step by step. Play it back, pause, or step through it by hand."
				</p>
			</div>
			<ul class="visualizations">
				{VISUALIZATIONS
					.iter()
					.map(|(href, title, blurb)| {
						view! {
							<li>
								<A href=*href>{*title}</A>
								<p>{*blurb}</p>
							</li>
						}
					})
					.collect_view()}
			</ul>
		</main>
	}
}
