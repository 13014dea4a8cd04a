//! Integration tests for the `waypoint` facade
//!
//! Verifies that the prelude is enough to assemble a working router and that
//! the devtools surface reports router state as JSON.

use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use waypoint::prelude::*;

fn app() -> (Router<String>, Arc<MemoryHistory>, Arc<RouterOutlet<String>>) {
	let history = Arc::new(MemoryHistory::with_initial("/docs"));
	let outlet = Arc::new(RouterOutlet::<String>::new());
	let router = Router::builder()
		.route(
			route("/docs", |_: &Params, page: Option<String>| {
				format!("docs:{}", page.unwrap_or_else(|| "index".to_string()))
			})
			.name("docs")
			.child(route("/:section/*page", |p: &Params, _: Option<String>| {
				format!("{}/{}", p["section"], p["page"])
			})
			.name("docs-page")),
		)
		.history(history.clone())
		.render_target(outlet.clone())
		.build()
		.unwrap();
	(router, history, outlet)
}

#[rstest]
fn test_prelude_builds_router() {
	// Arrange
	let (router, history, outlet) = app();
	assert_eq!(outlet.current().as_deref(), Some("docs:index"));

	// Act
	let target = router
		.reverse("docs-page", &[("section", "guide"), ("page", "routing/nesting")])
		.unwrap();
	router.push(&target).unwrap();

	// Assert
	assert_eq!(target, "/docs/guide/routing/nesting");
	assert_eq!(outlet.current().as_deref(), Some("docs:guide/routing/nesting"));
	assert_eq!(history.len(), 2);
}

#[rstest]
fn test_devtools_snapshot_and_navigate() {
	let (router, _history, _outlet) = app();
	let devtools = router.devtools();

	devtools.navigate("/docs/api/router").unwrap();
	let snapshot = devtools.snapshot();

	assert_eq!(snapshot["location"]["pathname"], "/docs/api/router");
	assert_eq!(snapshot["route"], "/docs/:section/*page");
	assert_eq!(snapshot["name"], "docs-page");
	assert_eq!(
		snapshot["params"],
		json!({ "section": "api", "page": "router" })
	);
}

#[rstest]
fn test_router_module_reexport() {
	let matcher = waypoint::router::Matcher::new("/a/:b").unwrap();
	assert!(matcher.is_match("/a/c"));
}
