//! Depth-dependent sizing of markers, labels and links.
//!
//! Everything is drawn in screen space after projection. The perspective
//! factor `k` (screen pixels per normalized scene unit at a point's depth)
//! decides how large a marker appears and whether its label is legible.

/// Screen pixel bounds for a size that otherwise grows with `k`.
#[derive(Clone, Copy, Debug)]
pub struct PixelRange {
	pub min: f64,
	pub max: f64,
}

impl PixelRange {
	/// Screen size of `base` scene units at perspective factor `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		(base * k).clamp(self.min, self.max)
	}
}

/// Label opacity ramp: invisible up to `hidden_below`, opaque from `opaque_above`.
#[derive(Clone, Copy, Debug)]
pub struct LabelFade {
	pub hidden_below: f64,
	pub opaque_above: f64,
}

impl LabelFade {
	pub fn alpha(&self, k: f64) -> f64 {
		if self.opaque_above <= self.hidden_below {
			return 1.0;
		}
		((k - self.hidden_below) / (self.opaque_above - self.hidden_below)).clamp(0.0, 1.0)
	}
}

#[derive(Clone, Debug)]
pub struct MarkerScale {
	/// Radius in normalized scene units
	pub radius: f64,
	pub pixels: PixelRange,
	/// Extra pixels around the drawn radius that still count as a hit
	pub hit_slop: f64,
	pub label_size: f64,
	pub label_fade: LabelFade,
}

/// Line widths in screen pixels.
#[derive(Clone, Debug)]
pub struct LinkScale {
	pub overview_width: f64,
	pub selection_width: f64,
}

#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub marker: MarkerScale,
	pub link: LinkScale,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			marker: MarkerScale {
				radius: 0.02,
				pixels: PixelRange { min: 3.0, max: 14.0 },
				hit_slop: 3.0,
				label_size: 11.0,
				label_fade: LabelFade {
					hidden_below: 60.0,
					opaque_above: 140.0,
				},
			},
			link: LinkScale {
				overview_width: 1.0,
				selection_width: 2.0,
			},
		}
	}
}

impl ScaleConfig {
	/// On-screen marker radius at perspective factor `k`.
	pub fn node_radius(&self, k: f64) -> f64 {
		self.marker.pixels.apply(self.marker.radius, k)
	}

	/// Picking radius: the drawn radius plus the hit slop.
	pub fn hit_radius(&self, k: f64) -> f64 {
		self.node_radius(k) + self.marker.hit_slop
	}

	pub fn label_font(&self) -> String {
		format!("{}px sans-serif", self.marker.label_size)
	}
}
