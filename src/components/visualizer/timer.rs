use std::time::Duration;

use log::warn;
use wasm_bindgen::prelude::*;

use crate::engine::Ticker;

/// Browser `setInterval` timer. The callback is bound once, after the
/// owning session exists, and reused by every start.
#[derive(Default)]
pub struct IntervalTicker {
	callback: Option<Closure<dyn FnMut()>>,
	handle: Option<i32>,
	interval: Option<Duration>,
}

impl IntervalTicker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn bind(&mut self, callback: impl FnMut() + 'static) {
		self.callback = Some(Closure::new(callback));
	}
}

impl Ticker for IntervalTicker {
	fn start(&mut self, interval: Duration) {
		self.stop();
		let (Some(window), Some(cb)) = (web_sys::window(), self.callback.as_ref()) else {
			warn!("playback timer unavailable");
			return;
		};
		let millis = i32::try_from(interval.as_millis()).unwrap_or(i32::MAX);
		match window.set_interval_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), millis) {
			Ok(handle) => {
				self.handle = Some(handle);
				self.interval = Some(interval);
			}
			Err(err) => warn!("could not start playback timer: {err:?}"),
		}
	}

	fn stop(&mut self) {
		if let Some(handle) = self.handle.take() {
			if let Some(window) = web_sys::window() {
				window.clear_interval_with_handle(handle);
			}
		}
		self.interval = None;
	}

	fn is_active(&self) -> bool {
		self.handle.is_some()
	}

	fn interval(&self) -> Option<Duration> {
		self.interval
	}
}

impl Drop for IntervalTicker {
	fn drop(&mut self) {
		self.stop();
	}
}
