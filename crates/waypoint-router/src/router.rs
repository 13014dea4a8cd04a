//! Core Router Implementation.
//!
//! [`Router`] ties the pieces together: it owns the route tree and the
//! [`LocationStore`], drives a [`HistoryBinding`], intercepts document
//! clicks through a [`ClickSource`], and re-resolves and re-renders whenever
//! the location changes.
//!
//! Requests raised while another request is being processed (a subscriber
//! or guard that navigates, a popstate fired mid-navigation) are queued and
//! run once the current one has finished, up to
//! [`RouterConfig::max_chained_navigations`].

use crate::config::RouterConfig;
use crate::error::{RenderError, RouterError};
use crate::history::{HistoryBinding, ListenerId, MemoryHistory, NavigationType};
use crate::link::{ClickEvent, ClickSource, IgnoreReason, LinkDecision, classify_click};
use crate::location::Location;
use crate::pattern::Params;
use crate::render::{RenderTarget, compose};
use crate::resolve::{Match, resolve};
use crate::route::{RouteDefinition, RouteView, view_fn};
use crate::store::{LocationStore, SubscriptionId};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use url::Url;

/// Base used to resolve relative targets when the history has no origin.
const FALLBACK_ORIGIN: &str = "http://localhost/";

/// Type alias for the guard consulted before a navigation commits.
pub type BeforeGuard = Arc<dyn Fn(&Location) -> bool + Send + Sync>;

/// Type alias for the guard notified after a navigation commits.
pub type AfterGuard = Arc<dyn Fn(&Location, &Location) + Send + Sync>;

/// Options for [`Router::navigate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateOptions {
	/// Replace the current history entry instead of pushing a new one.
	pub replace: bool,
	/// State stored with the history entry and exposed on the location.
	pub state: Value,
}

impl NavigateOptions {
	/// Push navigation without state.
	pub fn push() -> Self {
		Self::default()
	}

	/// Replace navigation without state.
	pub fn replace() -> Self {
		Self {
			replace: true,
			..Self::default()
		}
	}

	/// Attaches history state.
	pub fn with_state(mut self, state: Value) -> Self {
		self.state = state;
		self
	}
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
	/// History and the store were updated.
	Committed,
	/// The before-guard vetoed the request. Nothing changed.
	Rejected,
	/// Another request was in progress; this one runs after it.
	Queued,
	/// Back/forward landed on the entry already committed. Nothing changed.
	Unchanged,
}

#[derive(Debug)]
enum Request {
	Navigate { to: String, options: NavigateOptions },
	PopState,
}

#[derive(Default)]
struct Guards {
	before: Option<BeforeGuard>,
	after: Option<AfterGuard>,
}

#[derive(Default)]
struct Listeners {
	pop_state: Option<ListenerId>,
	click: Option<ListenerId>,
	store: Option<SubscriptionId>,
}

/// Ownership of the dispatch loop.
///
/// The flag is only ever cleared while the queue lock is held, so a request
/// is either queued before the owner sees an empty queue or finds the flag
/// clear and dispatches itself. Dropping an unreleased guard (a callback
/// panicked) clears the flag as well.
struct DispatchGuard<'a> {
	dispatching: &'a AtomicBool,
	pending: &'a Mutex<VecDeque<Request>>,
	released: bool,
}

impl DispatchGuard<'_> {
	/// Pops the next queued request, releasing the loop when there is none.
	fn next(&mut self) -> Option<Request> {
		let mut pending = self.pending.lock();
		let next = pending.pop_front();
		if next.is_none() {
			self.dispatching.store(false, Ordering::Release);
			self.released = true;
		}
		next
	}

	/// Drops everything queued and releases the loop.
	fn abort(&mut self) {
		let mut pending = self.pending.lock();
		pending.clear();
		self.dispatching.store(false, Ordering::Release);
		self.released = true;
	}
}

impl Drop for DispatchGuard<'_> {
	fn drop(&mut self) {
		if !self.released {
			let _pending = self.pending.lock();
			self.dispatching.store(false, Ordering::Release);
		}
	}
}

/// Builder for [`Router`].
pub struct RouterBuilder<V: 'static> {
	routes: Vec<RouteDefinition<V>>,
	not_found: Option<Arc<dyn RouteView<V>>>,
	config: RouterConfig,
	history: Option<Arc<dyn HistoryBinding>>,
	clicks: Option<Arc<dyn ClickSource>>,
	render_target: Option<Arc<dyn RenderTarget<V>>>,
	guards: Guards,
}

impl<V: 'static> Default for RouterBuilder<V> {
	fn default() -> Self {
		Self {
			routes: Vec::new(),
			not_found: None,
			config: RouterConfig::default(),
			history: None,
			clicks: None,
			render_target: None,
			guards: Guards::default(),
		}
	}
}

impl<V: 'static> fmt::Debug for RouterBuilder<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterBuilder")
			.field("routes", &self.routes)
			.field("has_not_found", &self.not_found.is_some())
			.field("config", &self.config)
			.finish()
	}
}

impl<V: 'static> RouterBuilder<V> {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a top-level route. Registration order is match order.
	pub fn route(mut self, route: RouteDefinition<V>) -> Self {
		self.routes.push(route);
		self
	}

	/// Adds several top-level routes.
	pub fn routes<I>(mut self, routes: I) -> Self
	where
		I: IntoIterator<Item = RouteDefinition<V>>,
	{
		self.routes.extend(routes);
		self
	}

	/// Sets the view rendered when no route matches.
	pub fn not_found<F>(mut self, view: F) -> Self
	where
		F: Fn(&Params, Option<V>) -> V + Send + Sync + 'static,
	{
		self.not_found = Some(view_fn(view));
		self
	}

	/// Sets the router configuration.
	pub fn config(mut self, config: RouterConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the history binding. Defaults to a fresh [`MemoryHistory`].
	pub fn history(mut self, history: Arc<dyn HistoryBinding>) -> Self {
		self.history = Some(history);
		self
	}

	/// Sets the document click source used for link interception.
	pub fn clicks(mut self, clicks: Arc<dyn ClickSource>) -> Self {
		self.clicks = Some(clicks);
		self
	}

	/// Sets where composed output is mounted.
	pub fn render_target(mut self, target: Arc<dyn RenderTarget<V>>) -> Self {
		self.render_target = Some(target);
		self
	}

	/// Sets the before-guard.
	pub fn before_guard<F>(mut self, guard: F) -> Self
	where
		F: Fn(&Location) -> bool + Send + Sync + 'static,
	{
		self.guards.before = Some(Arc::new(guard));
		self
	}

	/// Sets the after-guard.
	pub fn after_guard<F>(mut self, guard: F) -> Self
	where
		F: Fn(&Location, &Location) + Send + Sync + 'static,
	{
		self.guards.after = Some(Arc::new(guard));
		self
	}

	/// Validates every route, attaches the browser listeners and renders the
	/// initial location.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] for the first route whose
	/// pattern or filters do not compile, and
	/// [`RouterError::DuplicateRouteName`] / [`RouterError::InvalidRouteName`]
	/// for bad route names.
	pub fn build(self) -> Result<Router<V>, RouterError> {
		let routes: Vec<Arc<RouteDefinition<V>>> = self.routes.into_iter().map(Arc::new).collect();

		validate(&routes, &self.config)?;
		let mut names = HashMap::new();
		let mut chain = Vec::new();
		index_names(&routes, &mut chain, &mut names)?;

		let history = self
			.history
			.unwrap_or_else(|| Arc::new(MemoryHistory::new()) as Arc<dyn HistoryBinding>);
		let store = LocationStore::new(history.current_location());
		let position = AtomicUsize::new(history.position());

		let inner = Arc::new(RouterInner {
			routes,
			names,
			not_found: self.not_found,
			config: self.config,
			store,
			position,
			history,
			clicks: self.clicks,
			render_target: self.render_target,
			guards: Mutex::new(self.guards),
			current: Mutex::new(None),
			pending: Mutex::new(VecDeque::new()),
			dispatching: AtomicBool::new(false),
			listeners: Mutex::new(Listeners::default()),
			disposed: AtomicBool::new(false),
		});
		RouterInner::attach(&inner);

		let initial = inner.store.get();
		inner.refresh(&initial);
		tracing::info!(
			routes = inner.routes.len(),
			path = initial.pathname(),
			"router initialized"
		);

		Ok(Router { inner })
	}
}

fn validate<V: 'static>(
	routes: &[Arc<RouteDefinition<V>>],
	config: &RouterConfig,
) -> Result<(), RouterError> {
	for route in routes {
		route
			.compile(config)
			.map_err(|source| RouterError::InvalidPattern {
				pattern: route.path().to_string(),
				source,
			})?;
		validate(route.children_routes(), config)?;
	}
	Ok(())
}

fn index_names<V: 'static>(
	routes: &[Arc<RouteDefinition<V>>],
	chain: &mut Vec<Arc<RouteDefinition<V>>>,
	names: &mut HashMap<String, Vec<Arc<RouteDefinition<V>>>>,
) -> Result<(), RouterError> {
	for route in routes {
		chain.push(Arc::clone(route));
		if let Some(name) = route.route_name() {
			if name.trim().is_empty() {
				return Err(RouterError::InvalidRouteName(name.to_string()));
			}
			if names.insert(name.to_string(), chain.clone()).is_some() {
				return Err(RouterError::DuplicateRouteName(name.to_string()));
			}
		}
		index_names(route.children_routes(), chain, names)?;
		chain.pop();
	}
	Ok(())
}

struct RouterInner<V: 'static> {
	routes: Vec<Arc<RouteDefinition<V>>>,
	/// Route name to the chain of definitions from the root to the named route.
	names: HashMap<String, Vec<Arc<RouteDefinition<V>>>>,
	not_found: Option<Arc<dyn RouteView<V>>>,
	config: RouterConfig,
	store: LocationStore,
	/// History index of the committed entry.
	position: AtomicUsize,
	history: Arc<dyn HistoryBinding>,
	clicks: Option<Arc<dyn ClickSource>>,
	render_target: Option<Arc<dyn RenderTarget<V>>>,
	guards: Mutex<Guards>,
	current: Mutex<Option<Match<V>>>,
	pending: Mutex<VecDeque<Request>>,
	dispatching: AtomicBool,
	listeners: Mutex<Listeners>,
	disposed: AtomicBool,
}

impl<V: 'static> RouterInner<V> {
	fn attach(this: &Arc<Self>) {
		let mut listeners = this.listeners.lock();

		// Registered first so later subscribers observe the fresh match.
		let weak: Weak<Self> = Arc::downgrade(this);
		listeners.store = Some(this.store.subscribe(move |location| {
			if let Some(inner) = weak.upgrade() {
				inner.refresh(location);
			}
		}));

		let weak: Weak<Self> = Arc::downgrade(this);
		listeners.pop_state = Some(this.history.on_pop_state(Arc::new(move || {
			if let Some(inner) = weak.upgrade() {
				if let Err(err) = inner.submit(Request::PopState) {
					tracing::warn!(error = %err, "popstate handling failed");
				}
			}
		})));

		if let Some(clicks) = this.clicks.as_ref().filter(|_| this.config.intercept_links()) {
			let weak: Weak<Self> = Arc::downgrade(this);
			listeners.click = Some(clicks.on_click(Arc::new(move |event: &mut ClickEvent| {
				if let Some(inner) = weak.upgrade() {
					inner.handle_click(event);
				}
			})));
		}
	}

	fn detach(&self) {
		let mut listeners = self.listeners.lock();
		if let Some(id) = listeners.pop_state.take() {
			self.history.remove_listener(id);
		}
		if let (Some(id), Some(clicks)) = (listeners.click.take(), self.clicks.as_ref()) {
			clicks.remove_listener(id);
		}
		if let Some(id) = listeners.store.take() {
			self.store.unsubscribe(id);
		}
	}

	fn submit(&self, request: Request) -> Result<Navigation, RouterError> {
		if self.disposed.load(Ordering::Acquire) {
			return Err(RouterError::Disposed);
		}
		let limit = self.config.max_chained_navigations();

		{
			let mut pending = self.pending.lock();
			if self.dispatching.swap(true, Ordering::AcqRel) {
				if pending.len() >= limit {
					pending.clear();
					tracing::error!(limit, "navigation queue overflowed; dropping queued requests");
					return Err(RouterError::NavigationLoop { limit });
				}
				tracing::debug!(?request, "navigation queued");
				pending.push_back(request);
				return Ok(Navigation::Queued);
			}
		}
		let mut dispatch = DispatchGuard {
			dispatching: &self.dispatching,
			pending: &self.pending,
			released: false,
		};

		let result = self.process(request);

		let mut chained = 0;
		while let Some(next) = dispatch.next() {
			chained += 1;
			if chained > limit {
				dispatch.abort();
				tracing::error!(limit, "navigation loop detected; aborting chained navigations");
				return Err(RouterError::NavigationLoop { limit });
			}
			if let Err(err) = self.process(next) {
				tracing::warn!(error = %err, "queued navigation failed");
			}
		}

		result
	}

	fn process(&self, request: Request) -> Result<Navigation, RouterError> {
		match request {
			Request::Navigate { to, options } => self.process_navigate(&to, options),
			Request::PopState => Ok(self.process_pop_state()),
		}
	}

	fn process_navigate(&self, to: &str, options: NavigateOptions) -> Result<Navigation, RouterError> {
		let previous = self.store.get();
		let base = self.base_url()?;
		let candidate = previous.resolve(to, &base)?.with_state(options.state.clone());

		if !self.allows(&candidate) {
			tracing::debug!(path = candidate.pathname(), "navigation rejected by guard");
			return Ok(Navigation::Rejected);
		}

		let href = candidate.href();
		let kind = if options.replace {
			NavigationType::Replace
		} else {
			NavigationType::Push
		};
		let recorded = match kind {
			NavigationType::Replace => self.history.replace_entry(&href, &options.state),
			_ => self.history.push_entry(&href, &options.state),
		};
		recorded.map_err(|err| RouterError::NavigationFailed(err.to_string()))?;
		self.position.store(self.history.position(), Ordering::Release);

		self.commit(previous, candidate, kind);
		Ok(Navigation::Committed)
	}

	fn process_pop_state(&self) -> Navigation {
		let position = self.history.position();
		let committed = self.position.load(Ordering::Acquire);
		if position == committed {
			tracing::trace!(position, "popstate on the committed entry");
			return Navigation::Unchanged;
		}

		let previous = self.store.get();
		let candidate = self.history.current_location();

		if self.config.guard_popstate() && !self.allows(&candidate) {
			tracing::debug!(path = candidate.pathname(), "back/forward rejected by guard");
			// Move the browser back onto the committed entry; the resulting
			// popstate lands on `committed` and is a no-op.
			let delta = committed as isize - position as isize;
			if !self.history.go(delta) {
				tracing::warn!(delta, "failed to restore history after rejected back/forward");
			}
			return Navigation::Rejected;
		}

		self.position.store(position, Ordering::Release);
		self.commit(previous, candidate, NavigationType::Pop);
		Navigation::Committed
	}

	fn commit(&self, previous: Location, next: Location, kind: NavigationType) {
		tracing::debug!(from = %previous, to = %next, ?kind, "navigation committed");
		self.store.set(next.clone());

		let after = self.guards.lock().after.clone();
		if let Some(after) = after {
			after(&previous, &next);
		}
	}

	fn allows(&self, candidate: &Location) -> bool {
		let before = self.guards.lock().before.clone();
		before.is_none_or(|guard| guard(candidate))
	}

	fn base_url(&self) -> Result<Url, RouterError> {
		match self.history.origin() {
			Some(origin) => Ok(origin),
			None => Url::parse(FALLBACK_ORIGIN).map_err(|err| RouterError::NavigationFailed(err.to_string())),
		}
	}

	fn handle_click(&self, event: &mut ClickEvent) -> LinkDecision {
		if !self.config.intercept_links() || self.disposed.load(Ordering::Acquire) {
			return LinkDecision::Ignore(IgnoreReason::Disabled);
		}

		let decision = classify_click(event, self.history.origin().as_ref());
		match &decision {
			LinkDecision::Intercept { href, replace } => {
				tracing::debug!(href = %href, replace, "link click intercepted");
				event.prevent_default();
				let request = Request::Navigate {
					to: href.clone(),
					options: NavigateOptions {
						replace: *replace,
						state: Value::Null,
					},
				};
				if let Err(err) = self.submit(request) {
					tracing::warn!(href = %href, error = %err, "intercepted navigation failed");
				}
			}
			LinkDecision::Ignore(reason) => {
				tracing::debug!(?reason, "link click left to the browser");
			}
		}
		decision
	}

	fn match_location(&self, location: &Location) -> Option<Match<V>> {
		resolve(location.pathname(), &self.routes, &Params::new(), &self.config)
	}

	/// Re-resolves `location`, caches the match and re-renders.
	fn refresh(&self, location: &Location) {
		let matched = self.match_location(location);
		if matched.is_none() {
			tracing::warn!(path = location.pathname(), "no route matched");
		}
		*self.current.lock() = matched.clone();

		let Some(target) = &self.render_target else {
			return;
		};
		match self.render(matched.as_ref()) {
			Ok(output) => target.mount(output),
			Err(err) => {
				tracing::warn!(path = location.pathname(), error = %err, "render failed; keeping previous output");
			}
		}
	}

	fn render(&self, matched: Option<&Match<V>>) -> Result<Option<V>, RenderError> {
		match (matched, &self.not_found) {
			(Some(matched), _) => compose(matched).map(Some),
			(None, Some(view)) => view.render(&Params::new(), None).map(Some),
			(None, None) => Ok(None),
		}
	}
}

impl<V: 'static> Drop for RouterInner<V> {
	fn drop(&mut self) {
		self.detach();
	}
}

/// Client-side router handle.
///
/// Cloning is cheap; every clone drives the same router. Browser listeners
/// only hold weak references, so dropping the last handle detaches them.
///
/// # Examples
///
/// ```
/// use waypoint_router::{NavigateOptions, Navigation, Params, Router, route};
///
/// let router = Router::builder()
///     .route(route("/", |_: &Params, _: Option<String>| "home".to_string()))
///     .route(route("/users/:id", |p: &Params, _: Option<String>| format!("user {}", p["id"])))
///     .build()
///     .unwrap();
///
/// let outcome = router.navigate("/users/42", NavigateOptions::push()).unwrap();
/// assert_eq!(outcome, Navigation::Committed);
/// assert_eq!(router.params().get("id").map(String::as_str), Some("42"));
/// ```
pub struct Router<V: 'static> {
	inner: Arc<RouterInner<V>>,
}

impl<V: 'static> Clone for Router<V> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<V: 'static> fmt::Debug for Router<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.inner.routes.len())
			.field("named_routes", &self.inner.names.len())
			.field("location", &self.inner.store.get().href())
			.field("disposed", &self.is_disposed())
			.finish()
	}
}

impl<V: 'static> Router<V> {
	/// Starts building a router.
	pub fn builder() -> RouterBuilder<V> {
		RouterBuilder::new()
	}

	/// Navigates to `to`.
	///
	/// `to` may be an absolute path or a relative reference (`./edit`,
	/// `../list`, `?page=2`, `#top`), resolved against the current location.
	/// A veto from the before-guard is reported as [`Navigation::Rejected`],
	/// not as an error.
	///
	/// # Errors
	///
	/// [`RouterError::NavigationFailed`] if the history binding refuses the
	/// entry, [`RouterError::NavigationLoop`] if chained navigations exceed
	/// the configured limit, [`RouterError::Disposed`] after
	/// [`dispose`](Self::dispose).
	pub fn navigate(&self, to: &str, options: NavigateOptions) -> Result<Navigation, RouterError> {
		self.inner.submit(Request::Navigate {
			to: to.to_string(),
			options,
		})
	}

	/// Navigates to a path using a pushed entry.
	pub fn push(&self, to: &str) -> Result<Navigation, RouterError> {
		self.navigate(to, NavigateOptions::push())
	}

	/// Navigates to a path replacing the current entry.
	pub fn replace(&self, to: &str) -> Result<Navigation, RouterError> {
		self.navigate(to, NavigateOptions::replace())
	}

	/// Matches a path against the route tree without navigating.
	///
	/// Any query string or fragment is ignored.
	pub fn match_path(&self, path: &str) -> Option<Match<V>> {
		self.inner.match_location(&Location::parse(path))
	}

	/// The current location.
	pub fn location(&self) -> Location {
		self.inner.store.get()
	}

	/// Parameters of the current match; empty when nothing matched.
	pub fn params(&self) -> Params {
		self.inner
			.current
			.lock()
			.as_ref()
			.map(|matched| matched.params().clone())
			.unwrap_or_default()
	}

	/// The match for the current location.
	pub fn current_match(&self) -> Option<Match<V>> {
		self.inner.current.lock().clone()
	}

	/// Subscribes to location changes.
	///
	/// Subscribers run after the router has re-resolved the new location, so
	/// [`params`](Self::params) is already up to date inside the callback.
	pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
	where
		F: Fn(&Location) + Send + Sync + 'static,
	{
		self.inner.store.subscribe(subscriber)
	}

	/// Removes a subscriber added with [`subscribe`](Self::subscribe).
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.inner.store.unsubscribe(id)
	}

	/// Replaces the before-guard.
	pub fn set_before_guard<F>(&self, guard: F)
	where
		F: Fn(&Location) -> bool + Send + Sync + 'static,
	{
		self.inner.guards.lock().before = Some(Arc::new(guard));
	}

	/// Replaces the after-guard.
	pub fn set_after_guard<F>(&self, guard: F)
	where
		F: Fn(&Location, &Location) + Send + Sync + 'static,
	{
		self.inner.guards.lock().after = Some(Arc::new(guard));
	}

	/// Removes both guards.
	pub fn clear_guards(&self) {
		*self.inner.guards.lock() = Guards::default();
	}

	/// Generates a URL by route name with parameters.
	///
	/// Nested routes contribute their ancestors' segments, so a child named
	/// `post` under `/users/:user_id` needs both parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let chain = self
			.inner
			.names
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;

		let params_map: Params = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		let mut segments = Vec::new();
		for route in chain {
			let matcher = route
				.compile(&self.inner.config)
				.map_err(|source| RouterError::InvalidPattern {
					pattern: route.path().to_string(),
					source,
				})?;
			matcher
				.reverse_into(&params_map, &mut segments)
				.map_err(|missing| {
					tracing::debug!(route = name, param = %missing, "reverse lookup is missing a parameter");
					RouterError::MissingParameter(name.to_string())
				})?;
		}
		Ok(format!("/{}", segments.join("/")))
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.inner.names.contains_key(name)
	}

	/// Returns the number of registered routes, children included.
	pub fn route_count(&self) -> usize {
		fn count<T: 'static>(routes: &[Arc<RouteDefinition<T>>]) -> usize {
			routes
				.iter()
				.map(|route| 1 + count(route.children_routes()))
				.sum()
		}
		count(&self.inner.routes)
	}

	/// The configuration the router was built with.
	pub fn config(&self) -> &RouterConfig {
		&self.inner.config
	}

	/// Renders the current match, or the not-found view when nothing matched.
	///
	/// Returns `Ok(None)` when nothing matched and no not-found view exists.
	pub fn render_current(&self) -> Result<Option<V>, RenderError> {
		let matched = self.current_match();
		self.inner.render(matched.as_ref())
	}

	/// Runs the link-click heuristics on `event`, navigating when the click
	/// is intercepted.
	///
	/// This is what the registered click listener calls; hosts that dispatch
	/// clicks themselves can call it directly.
	pub fn handle_click(&self, event: &mut ClickEvent) -> LinkDecision {
		self.inner.handle_click(event)
	}

	/// Detaches every browser listener. Later navigations fail with
	/// [`RouterError::Disposed`].
	pub fn dispose(&self) {
		if self.inner.disposed.swap(true, Ordering::AcqRel) {
			return;
		}
		self.inner.detach();
		self.inner.pending.lock().clear();
		tracing::info!("router disposed");
	}

	/// Whether [`dispose`](Self::dispose) has been called.
	pub fn is_disposed(&self) -> bool {
		self.inner.disposed.load(Ordering::Acquire)
	}

	/// Debug surface exposing the current state and a navigate entry point.
	#[cfg(feature = "debug-hooks")]
	pub fn devtools(&self) -> crate::devtools::Devtools<V> {
		crate::devtools::Devtools::new(self.clone())
	}
}
