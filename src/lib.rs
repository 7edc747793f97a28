//! Step-by-step data structure visualizations: a Leptos client-side app
//! over a structure-agnostic step recorder and playback engine.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod engine;
pub mod layout;
pub mod structures;
pub mod validation;

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::pages::graph::GraphPage;
use crate::pages::hash_set::HashSetPage;
use crate::pages::heap::HeapPage;
use crate::pages::home::Home;
use crate::pages::list::ListPage;
use crate::pages::not_found::NotFound;
use crate::pages::queue::QueuePage;
use crate::pages::stack::StackPage;
use crate::pages::tree::TreePage;
use crate::pages::trie::TriePage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router with one route per visualization and a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Data Structure Visualizer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/tree") view=TreePage />
				<Route path=path!("/list") view=ListPage />
				<Route path=path!("/stack") view=StackPage />
				<Route path=path!("/queue") view=QueuePage />
				<Route path=path!("/hash-set") view=HashSetPage />
				<Route path=path!("/heap") view=HeapPage />
				<Route path=path!("/trie") view=TriePage />
				<Route path=path!("/graph") view=GraphPage />
			</Routes>
		</Router>
	}
}
