//! Leptos client-side app wiring and routes.
//!
//! A prompt is sent to the generation service, the returned Mermaid or DOT
//! source is themed and rendered to SVG in the browser, and the accompanying
//! graph is shown as JSON and as an interactive force layout.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
#[macro_use]
pub mod types;
mod browser;
mod components;
mod config;
mod constants;
pub mod diagram;
pub mod error;
mod pages;
mod services;
pub mod settings;
mod state;

// Top-Level pages
use crate::config::AppConfig;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::settings::{BrowserSiteTheme, DocumentRoot, LocalStorage};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the diagram editor and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::from_env();
	info!("generation service at {}", config.api_base);
	provide_context(config);
	provide_context::<BrowserSiteTheme>(BrowserSiteTheme::new(LocalStorage, DocumentRoot));

	view! {
		<Html attr:lang="en" attr:dir="ltr" />

		// sets the document title
		<Title text="DiagramAI" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
