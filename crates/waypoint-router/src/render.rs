//! Composing nested route output.

use crate::error::RenderError;
use crate::resolve::Match;
use parking_lot::Mutex;

/// Receives the composed output of each successful render pass.
///
/// `None` means nothing matched and no not-found view was registered.
pub trait RenderTarget<V>: Send + Sync {
	/// Replaces whatever is currently mounted.
	fn mount(&self, output: Option<V>);
}

impl<V, F> RenderTarget<V> for F
where
	F: Fn(Option<V>) + Send + Sync,
{
	fn mount(&self, output: Option<V>) {
		self(output)
	}
}

/// A render target that keeps the most recent output.
#[derive(Debug)]
pub struct RouterOutlet<V> {
	current: Mutex<Option<V>>,
	mounts: Mutex<usize>,
}

impl<V> Default for RouterOutlet<V> {
	fn default() -> Self {
		Self {
			current: Mutex::new(None),
			mounts: Mutex::new(0),
		}
	}
}

impl<V: Clone> RouterOutlet<V> {
	/// Creates an empty outlet.
	pub fn new() -> Self {
		Self::default()
	}

	/// The most recently mounted output.
	pub fn current(&self) -> Option<V> {
		self.current.lock().clone()
	}

	/// How many times output has been mounted.
	pub fn mount_count(&self) -> usize {
		*self.mounts.lock()
	}
}

impl<V: Send> RenderTarget<V> for RouterOutlet<V> {
	fn mount(&self, output: Option<V>) {
		*self.current.lock() = output;
		*self.mounts.lock() += 1;
	}
}

/// Renders a match leaf first, handing each output to the next ancestor out.
pub(crate) fn compose<V: 'static>(matched: &Match<V>) -> Result<V, RenderError> {
	let params = matched.params();
	let mut output = matched.route().render(params, None)?;
	for ancestor in matched.ancestors().iter().rev() {
		output = ancestor.render(params, Some(output))?;
	}
	Ok(output)
}
