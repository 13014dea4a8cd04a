//! Router configuration.
//!
//! The router never reads configuration from disk; hosts construct a
//! [`RouterConfig`] directly or deserialize one from whatever format they
//! already use.
//!
//! # Examples
//!
//! ```
//! use waypoint_router::RouterConfig;
//!
//! let config = RouterConfig::default()
//!     .with_max_chained_navigations(4)
//!     .with_guard_popstate(false);
//! assert_eq!(config.max_chained_navigations(), 4);
//! assert!(!config.guard_popstate());
//! ```

use serde::Deserialize;

/// Default maximum pattern length: 1 KiB
const DEFAULT_MAX_PATTERN_LENGTH: usize = 1024;
/// Default maximum number of segments in one pattern
const DEFAULT_MAX_PATTERN_SEGMENTS: usize = 32;
/// Default number of navigations that may chain off a single request
const DEFAULT_MAX_CHAINED_NAVIGATIONS: usize = 16;

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
	max_pattern_length: usize,
	max_pattern_segments: usize,
	max_chained_navigations: usize,
	guard_popstate: bool,
	intercept_links: bool,
	decode_params: bool,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			max_pattern_length: DEFAULT_MAX_PATTERN_LENGTH,
			max_pattern_segments: DEFAULT_MAX_PATTERN_SEGMENTS,
			max_chained_navigations: DEFAULT_MAX_CHAINED_NAVIGATIONS,
			guard_popstate: true,
			intercept_links: true,
			decode_params: true,
		}
	}
}

impl RouterConfig {
	/// Maximum accepted pattern length in bytes.
	pub fn max_pattern_length(&self) -> usize {
		self.max_pattern_length
	}

	/// Maximum accepted number of `/`-separated segments in a pattern.
	pub fn max_pattern_segments(&self) -> usize {
		self.max_pattern_segments
	}

	/// How many navigations may be queued off one request (redirects raised
	/// by subscribers or guards) before the chain is aborted.
	pub fn max_chained_navigations(&self) -> usize {
		self.max_chained_navigations
	}

	/// Whether the before-guard also runs on browser back/forward.
	pub fn guard_popstate(&self) -> bool {
		self.guard_popstate
	}

	/// Whether document clicks are inspected for router links.
	pub fn intercept_links(&self) -> bool {
		self.intercept_links
	}

	/// Whether captured parameter values are percent-decoded.
	pub fn decode_params(&self) -> bool {
		self.decode_params
	}

	/// Sets the maximum pattern length.
	pub fn with_max_pattern_length(mut self, max: usize) -> Self {
		self.max_pattern_length = max;
		self
	}

	/// Sets the maximum number of pattern segments.
	pub fn with_max_pattern_segments(mut self, max: usize) -> Self {
		self.max_pattern_segments = max;
		self
	}

	/// Sets the chained navigation limit.
	pub fn with_max_chained_navigations(mut self, max: usize) -> Self {
		self.max_chained_navigations = max;
		self
	}

	/// Sets whether back/forward navigation is guarded.
	pub fn with_guard_popstate(mut self, enabled: bool) -> Self {
		self.guard_popstate = enabled;
		self
	}

	/// Sets whether link clicks are intercepted.
	pub fn with_intercept_links(mut self, enabled: bool) -> Self {
		self.intercept_links = enabled;
		self
	}

	/// Sets whether captured parameters are percent-decoded.
	pub fn with_decode_params(mut self, enabled: bool) -> Self {
		self.decode_params = enabled;
		self
	}
}
