use leptos::prelude::*;

use crate::components::{ControlPanel, GraphPanel};
use crate::engine::Settings;

/// Benchmark page: graph panel on the left, controls and traces on the
/// right. Holds the four phase-boundary timestamps and derives the elapsed
/// durations the control panel displays.
#[component]
pub fn Home() -> impl IntoView {
	let initial = Settings::default();
	let settings = RwSignal::new(initial);

	let draw_start = RwSignal::new(0.0_f64);
	let draw_end = RwSignal::new(0.0_f64);
	let stabilize_start = RwSignal::new(0.0_f64);
	let stabilize_end = RwSignal::new(0.0_f64);

	let draw_time = Signal::derive(move || draw_end.get() - draw_start.get());
	let stabilize_time = Signal::derive(move || stabilize_end.get() - stabilize_start.get());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div style="display: flex; flex-direction: row;">
				<div style="flex: 3;">
					<GraphPanel
						settings=settings
						on_draw_start=move |t: f64| draw_start.set(t)
						on_draw_end=move |t: f64| draw_end.set(t)
						on_stabilize_start=move |t: f64| stabilize_start.set(t)
						on_stabilize_end=move |t: f64| stabilize_end.set(t)
					/>
				</div>
				<div style="flex: 1;">
					<ControlPanel
						initial=initial
						on_settings_changed=move |s: Settings| settings.set(s)
						draw_time=draw_time
						stabilize_time=stabilize_time
					/>
				</div>
			</div>
		</ErrorBoundary>
	}
}
