//! Introspection surface for debugging tools.
//!
//! Enabled with the `debug-hooks` feature. A browser extension or a console
//! helper can read a JSON snapshot of the router and drive navigation
//! without holding typed access to the application's views.

use crate::error::RouterError;
use crate::location::Location;
use crate::router::{NavigateOptions, Navigation, Router};
use serde_json::{Value, json};

/// Debug handle onto a [`Router`].
pub struct Devtools<V: 'static> {
	router: Router<V>,
}

impl<V: 'static> std::fmt::Debug for Devtools<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Devtools").field("router", &self.router).finish()
	}
}

impl<V: 'static> Devtools<V> {
	pub(crate) fn new(router: Router<V>) -> Self {
		Self { router }
	}

	/// The current location.
	pub fn location(&self) -> Location {
		self.router.location()
	}

	/// JSON view of the current location, matched pattern and parameters.
	///
	/// `route` and `name` are `null` when nothing matched.
	pub fn snapshot(&self) -> Value {
		let location = self.router.location();
		let matched = self.router.current_match();
		json!({
			"location": {
				"href": location.href(),
				"pathname": location.pathname(),
				"search": location.search(),
				"hash": location.hash(),
				"state": location.state(),
			},
			"route": matched.as_ref().map(|m| m.pattern()),
			"name": matched.as_ref().and_then(|m| m.route().route_name().map(str::to_string)),
			"params": self.router.params(),
			"disposed": self.router.is_disposed(),
		})
	}

	/// Push navigation, as if called from application code.
	pub fn navigate(&self, to: &str) -> Result<Navigation, RouterError> {
		tracing::debug!(to, "navigation requested from devtools");
		self.router.navigate(to, NavigateOptions::push())
	}
}
