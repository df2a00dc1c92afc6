//! Settings form and timing readout.

use leptos::prelude::*;

use crate::engine::{Backend, EngineError, Settings};

fn parse_count(raw: &str, what: &str) -> Result<i64, EngineError> {
	raw.trim()
		.parse()
		.map_err(|_| EngineError::InvalidSettings(format!("{what} is not an integer: {raw:?}")))
}

/// Sidebar with the run configuration inputs and the measured times.
///
/// A new `Settings` is only pushed to `on_settings_changed` once it passes
/// validation; on rejection the error is shown and the running graph is
/// left alone. `draw_time` and `stabilize_time` are elapsed milliseconds
/// computed by the page from the engine's timestamp records.
#[component]
pub fn ControlPanel(
	initial: Settings,
	#[prop(into)] on_settings_changed: Callback<Settings>,
	#[prop(into)] draw_time: Signal<f64>,
	#[prop(into)] stabilize_time: Signal<f64>,
) -> impl IntoView {
	let nodes_input = RwSignal::new(initial.num_nodes.to_string());
	let links_input = RwSignal::new(initial.num_links.to_string());
	let backend = RwSignal::new(initial.backend);
	let error = RwSignal::new(None::<String>);

	let on_validate = move |_| {
		let result = parse_count(&nodes_input.get(), "number of nodes")
			.and_then(|nodes| {
				parse_count(&links_input.get(), "number of links").map(|links| (nodes, links))
			})
			.and_then(|(nodes, links)| Settings::new(nodes, links, backend.get()));
		match result {
			Ok(settings) => {
				error.set(None);
				on_settings_changed.run(settings);
			}
			Err(e) => error.set(Some(e.to_string())),
		}
	};

	let trace = |ms: f64| {
		if ms >= 0.0 {
			format!("{ms:.1} ms")
		} else {
			"...".to_string()
		}
	};

	view! {
		<div class="control-panel">
			<h2>"Controls"</h2>

			<label>"Backend"</label>
			<div class="backend-choice">
				<label>
					<input
						type="radio"
						name="backend"
						prop:checked=move || backend.get() == Backend::Canvas
						on:change=move |_| backend.set(Backend::Canvas)
					/>
					"canvas"
				</label>
				<label>
					<input
						type="radio"
						name="backend"
						prop:checked=move || backend.get() == Backend::Svg
						on:change=move |_| backend.set(Backend::Svg)
					/>
					"svg"
				</label>
			</div>

			<label>"Number of nodes"</label>
			<input
				type="number"
				min="1"
				max="100000"
				prop:value=move || nodes_input.get()
				on:input=move |ev| nodes_input.set(event_target_value(&ev))
			/>

			<label>"Number of links"</label>
			<input
				type="number"
				min="0"
				max="100000"
				prop:value=move || links_input.get()
				on:input=move |ev| links_input.set(event_target_value(&ev))
			/>

			<button type="button" on:click=on_validate>
				"Validate"
			</button>
			{move || error.get().map(|e| view! { <p class="error">{e}</p> })}

			<h2>"Traces"</h2>
			<div class="traces">
				<div>
					<label>"Drawing time:"</label>
					<code>{move || trace(draw_time.get())}</code>
				</div>
				<div>
					<label>"Stabilizing time:"</label>
					<code>{move || trace(stabilize_time.get())}</code>
				</div>
			</div>
		</div>
	}
}
