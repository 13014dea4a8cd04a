//! Link-click interception.
//!
//! The router listens for document clicks through a [`ClickSource`] and
//! decides, per click, whether the nearest anchor is an in-app link it
//! should handle or something the browser must keep handling. The decision
//! itself is a pure function, [`classify_click`].

use crate::history::ListenerId;
use crate::location::Location;
use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;

const EXCLUDED_SCHEMES: [&str; 3] = ["mailto:", "tel:", "javascript:"];

/// The anchor element nearest to a click target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
	/// The `href` attribute as written.
	pub href: Option<String>,
	/// The `target` attribute.
	pub target: Option<String>,
	/// Whether the `download` attribute is present.
	pub download: bool,
	/// Explicit router-link marker (`data-link`).
	pub router_link: bool,
	/// Navigate with a replace instead of a push (`data-replace`).
	pub replace: bool,
}

impl Anchor {
	/// An anchor with the given `href`.
	pub fn new(href: impl Into<String>) -> Self {
		Self {
			href: Some(href.into()),
			..Self::default()
		}
	}

	/// Builds an anchor from its attribute list.
	///
	/// Recognized attributes are `href`, `target`, `download`, `data-link`
	/// and `data-replace`; the rest are ignored.
	pub fn from_attributes<'a, I>(attributes: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let mut anchor = Self::default();
		for (name, value) in attributes {
			match name.to_ascii_lowercase().as_str() {
				"href" => anchor.href = Some(value.to_string()),
				"target" => anchor.target = Some(value.to_string()),
				"download" => anchor.download = true,
				"data-link" => anchor.router_link = value != "false",
				"data-replace" => anchor.replace = value != "false",
				_ => {}
			}
		}
		anchor
	}

	/// Sets the `target` attribute.
	pub fn target(mut self, target: impl Into<String>) -> Self {
		self.target = Some(target.into());
		self
	}

	/// Marks the anchor as a download link.
	pub fn download(mut self) -> Self {
		self.download = true;
		self
	}

	/// Marks the anchor as a router link.
	pub fn router_link(mut self) -> Self {
		self.router_link = true;
		self
	}

	/// Requests replace navigation.
	pub fn replace(mut self) -> Self {
		self.replace = true;
		self
	}
}

/// A document click as seen by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
	/// Mouse button; `0` is the primary button.
	pub button: i16,
	/// Ctrl held.
	pub ctrl_key: bool,
	/// Alt held.
	pub alt_key: bool,
	/// Meta held.
	pub meta_key: bool,
	/// Shift held.
	pub shift_key: bool,
	/// Nearest enclosing anchor, if any.
	pub anchor: Option<Anchor>,
	default_prevented: bool,
}

impl ClickEvent {
	/// An unmodified primary-button click on `anchor`.
	pub fn primary(anchor: Anchor) -> Self {
		Self {
			anchor: Some(anchor),
			..Self::default()
		}
	}

	/// Suppresses the browser's default action.
	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	/// Whether [`prevent_default`](Self::prevent_default) was called.
	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented
	}

	fn is_modified(&self) -> bool {
		self.ctrl_key || self.alt_key || self.meta_key || self.shift_key
	}
}

/// Callback invoked for each document click.
pub type ClickCallback = Arc<dyn Fn(&mut ClickEvent) + Send + Sync>;

/// Source of document click events.
pub trait ClickSource: Send + Sync {
	/// Registers a capturing click listener.
	fn on_click(&self, callback: ClickCallback) -> ListenerId;

	/// Removes a listener registered with [`on_click`](Self::on_click).
	fn remove_listener(&self, id: ListenerId) -> bool;
}

/// In-memory document that dispatches synthetic clicks.
#[derive(Default)]
pub struct MemoryDocument {
	listeners: Mutex<Vec<(ListenerId, ClickCallback)>>,
}

impl std::fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryDocument")
			.field("listeners", &self.listener_count())
			.finish()
	}
}

impl MemoryDocument {
	/// Creates a document with no listeners.
	pub fn new() -> Self {
		Self::default()
	}

	/// Dispatches `event` to every listener and returns it afterwards.
	pub fn click(&self, mut event: ClickEvent) -> ClickEvent {
		let listeners: Vec<ClickCallback> = self
			.listeners
			.lock()
			.iter()
			.map(|(_, callback)| Arc::clone(callback))
			.collect();
		for listener in listeners {
			listener(&mut event);
		}
		event
	}

	/// Number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.lock().len()
	}
}

impl ClickSource for MemoryDocument {
	fn on_click(&self, callback: ClickCallback) -> ListenerId {
		let id = ListenerId::next();
		self.listeners.lock().push((id, callback));
		id
	}

	fn remove_listener(&self, id: ListenerId) -> bool {
		let mut listeners = self.listeners.lock();
		let before = listeners.len();
		listeners.retain(|(existing, _)| *existing != id);
		listeners.len() != before
	}
}

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
	/// Not the primary mouse button.
	NonPrimaryButton,
	/// A modifier key was held.
	Modified,
	/// The click was not inside an anchor.
	NoAnchor,
	/// The anchor has no `href`.
	MissingHref,
	/// The anchor opens another browsing context.
	NewBrowsingContext,
	/// The anchor is a download link.
	Download,
	/// `mailto:`, `tel:` or `javascript:`.
	ExcludedScheme,
	/// The URL points at another origin.
	CrossOrigin,
	/// The `href` is not a form the router claims.
	Unrecognized,
	/// Link interception is turned off.
	Disabled,
}

/// Outcome of [`classify_click`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
	/// The router handles the click by navigating to `href`.
	Intercept {
		/// Target to navigate to.
		href: String,
		/// Whether to replace the current entry.
		replace: bool,
	},
	/// The browser keeps the click.
	Ignore(IgnoreReason),
}

impl LinkDecision {
	/// Whether the router takes the click.
	pub fn is_intercept(&self) -> bool {
		matches!(self, Self::Intercept { .. })
	}
}

/// Decides whether a click should be handled by the router.
///
/// `origin` is the application's origin; same-origin absolute URLs are only
/// recognized when it is known.
///
/// ```
/// use waypoint_router::{Anchor, ClickEvent, LinkDecision, classify_click};
///
/// let decision = classify_click(&ClickEvent::primary(Anchor::new("/about")), None);
/// assert_eq!(
///     decision,
///     LinkDecision::Intercept { href: "/about".to_string(), replace: false }
/// );
/// ```
pub fn classify_click(event: &ClickEvent, origin: Option<&Url>) -> LinkDecision {
	use IgnoreReason::*;

	if event.button != 0 {
		return LinkDecision::Ignore(NonPrimaryButton);
	}
	if event.is_modified() {
		return LinkDecision::Ignore(Modified);
	}
	let Some(anchor) = &event.anchor else {
		return LinkDecision::Ignore(NoAnchor);
	};
	let Some(href) = anchor.href.as_deref().map(str::trim) else {
		return LinkDecision::Ignore(MissingHref);
	};
	if anchor
		.target
		.as_deref()
		.is_some_and(|target| !target.is_empty() && !target.eq_ignore_ascii_case("_self"))
	{
		return LinkDecision::Ignore(NewBrowsingContext);
	}
	if anchor.download {
		return LinkDecision::Ignore(Download);
	}
	let lowered = href.to_ascii_lowercase();
	if EXCLUDED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
		return LinkDecision::Ignore(ExcludedScheme);
	}

	let intercept = |href: String| LinkDecision::Intercept {
		href,
		replace: anchor.replace,
	};

	let is_root_relative = href.starts_with('/') && !href.starts_with("//");
	if is_root_relative || href.starts_with("./") || href.starts_with("../") {
		return intercept(href.to_string());
	}

	let absolute = match origin {
		Some(origin) if href.starts_with("//") => origin.join(href).ok(),
		_ => Url::parse(href).ok(),
	};
	if let Some(url) = absolute {
		let same_origin = origin.is_some_and(|origin| origin.origin() == url.origin());
		if same_origin || anchor.router_link {
			return intercept(Location::from_url(&url).href());
		}
		return LinkDecision::Ignore(CrossOrigin);
	}

	if anchor.router_link && !href.is_empty() {
		return intercept(href.to_string());
	}
	LinkDecision::Ignore(Unrecognized)
}
