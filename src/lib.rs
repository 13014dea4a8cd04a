//! # Waypoint
//!
//! A client-side navigation engine for reactive single-page applications.
//!
//! Waypoint maps URL paths to a tree of routes, composes nested layouts, and
//! keeps the application's current location in step with browser history
//! and in-app link clicks. Rendering and the DOM binding stay with the host:
//! the router renders through [`router::RouteView`] and talks to the browser
//! through [`router::HistoryBinding`] and [`router::ClickSource`].
//!
//! ## Feature Flags
//!
//! - `debug-hooks` (default) - exposes [`router::Devtools`], a JSON snapshot of
//!   the current location and match plus a `navigate` entry point
//!
//! ## Quick Example
//!
//! ```
//! use waypoint::prelude::*;
//!
//! let router = Router::builder()
//!     .route(route("/", |_: &Params, _: Option<String>| "home".to_string()))
//!     .route(route("/users/new", |_: &Params, _: Option<String>| "new".to_string()))
//!     .route(
//!         route("/users/:id", |p: &Params, _: Option<String>| format!("user {}", p["id"]))
//!             .filter("id", r"\d+"),
//!     )
//!     .not_found(|_: &Params, _: Option<String>| "not found".to_string())
//!     .build()?;
//!
//! router.push("/users/42")?;
//! assert_eq!(router.params()["id"], "42");
//! assert_eq!(router.render_current()?.as_deref(), Some("user 42"));
//!
//! router.push("/users/abc")?;
//! assert!(router.params().is_empty());
//! assert_eq!(router.render_current()?.as_deref(), Some("not found"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use waypoint_router as router;

/// Re-export commonly used types.
pub mod prelude {
	pub use waypoint_router::prelude::*;
	pub use waypoint_router::{
		HistoryBinding, MemoryDocument, MemoryHistory, RenderTarget, RouteView,
	};

	#[cfg(feature = "debug-hooks")]
	pub use waypoint_router::Devtools;
}
