//! Sources for the random y-offset given to each node.

/// Yields values in `[-1, 1]`. Drawn once per node at creation.
pub trait Jitter {
	fn next_offset(&mut self) -> f64;
}

/// Deterministic jitter: the same seed always yields the same sequence.
#[derive(Clone, Debug, Default)]
pub struct SeededJitter {
	seed: f64,
	step: u64,
}

impl SeededJitter {
	pub fn new(seed: u64) -> Self {
		Self {
			seed: seed as f64,
			step: 0,
		}
	}

	/// Simple pseudo-random function (deterministic), in `[0, 1)`.
	fn pseudo_random(seed: f64) -> f64 {
		let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
		x - x.floor()
	}
}

impl Jitter for SeededJitter {
	fn next_offset(&mut self) -> f64 {
		self.step += 1;
		let t = Self::pseudo_random(self.seed * 1.1 + self.step as f64 * 2.3);
		t * 2.0 - 1.0
	}
}

/// Browser jitter backed by `Math.random`. Only usable on wasm targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserJitter;

impl Jitter for BrowserJitter {
	fn next_offset(&mut self) -> f64 {
		js_sys::Math::random() * 2.0 - 1.0
	}
}
