//! Orbit camera and perspective projection of the 3D scene onto the canvas.
//!
//! The scene is normalized into the cube `[-1, 1]^3` before projection, so
//! the camera is expressed in the same units regardless of how many nodes the
//! graph has. The camera is view state only: highlights never change it.

use serde::{Deserialize, Serialize};

use crate::network::builder::Position;
use crate::network::payload::NodeTrace;

/// Minimal 3-vector for camera math.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	fn sub(self, o: Vec3) -> Vec3 {
		Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z)
	}

	fn add(self, o: Vec3) -> Vec3 {
		Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z)
	}

	fn scale(self, s: f64) -> Vec3 {
		Vec3::new(self.x * s, self.y * s, self.z * s)
	}

	fn dot(self, o: Vec3) -> f64 {
		self.x * o.x + self.y * o.y + self.z * o.z
	}

	fn cross(self, o: Vec3) -> Vec3 {
		Vec3::new(
			self.y * o.z - self.z * o.y,
			self.z * o.x - self.x * o.z,
			self.x * o.y - self.y * o.x,
		)
	}

	fn length(self) -> f64 {
		self.dot(self).sqrt()
	}

	fn normalized(self) -> Vec3 {
		let len = self.length();
		if len < 1e-12 { self } else { self.scale(1.0 / len) }
	}
}

/// Camera placement in normalized scene units, like a plotting scene camera.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Camera {
	pub eye: Vec3,
	pub center: Vec3,
	pub up: Vec3,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			eye: Vec3::new(1.5, 1.5, 0.8),
			center: Vec3::new(0.0, 0.0, 0.0),
			up: Vec3::new(0.0, 0.0, 1.0),
		}
	}
}

/// Eye distance limits.
const MIN_DISTANCE: f64 = 0.6;
const MAX_DISTANCE: f64 = 12.0;
/// Radians per dragged pixel.
const ORBIT_SPEED: f64 = 0.008;

impl Camera {
	pub fn distance(&self) -> f64 {
		self.eye.sub(self.center).length()
	}

	/// Rotate the eye around the center: `dx` turns about the up axis, `dy`
	/// tilts towards or away from it.
	pub fn orbit(&mut self, dx: f64, dy: f64) {
		let offset = self.eye.sub(self.center);
		let r = offset.length();
		if r < 1e-12 {
			return;
		}
		let azimuth = offset.y.atan2(offset.x) - dx * ORBIT_SPEED;
		let elevation = ((offset.z / r).asin() + dy * ORBIT_SPEED).clamp(-1.45, 1.45);
		let flat = r * elevation.cos();
		self.eye = self.center.add(Vec3::new(
			flat * azimuth.cos(),
			flat * azimuth.sin(),
			r * elevation.sin(),
		));
	}

	/// Move the eye along its line of sight; `factor < 1` moves closer.
	pub fn zoom(&mut self, factor: f64) {
		let offset = self.eye.sub(self.center);
		let r = offset.length();
		if r < 1e-12 {
			return;
		}
		let target = (r * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
		self.eye = self.center.add(offset.scale(target / r));
	}
}

/// Axis-aligned data bounds used to normalize positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBounds {
	pub min: Position,
	pub max: Position,
}

impl SceneBounds {
	/// Bounds of the node trace; z always spans all three layers.
	pub fn of(trace: &NodeTrace) -> Self {
		let fold = |values: &[f64], lo: f64, hi: f64| {
			values
				.iter()
				.fold((lo, hi), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
		};
		let (x0, x1) = fold(&trace.x, 0.0, 0.0);
		let (y0, y1) = fold(&trace.y, -1.0, 1.0);
		let (z0, z1) = fold(&trace.z, 0.0, 2.0);
		Self {
			min: Position { x: x0, y: y0, z: z0 },
			max: Position { x: x1, y: y1, z: z1 },
		}
	}

	/// Map `p` into `[-1, 1]^3`.
	pub fn normalize(&self, p: Position) -> Vec3 {
		let axis = |v: f64, lo: f64, hi: f64| {
			let half = (hi - lo) / 2.0;
			if half.abs() < 1e-12 { 0.0 } else { (v - (lo + half)) / half }
		};
		Vec3::new(
			axis(p.x, self.min.x, self.max.x),
			axis(p.y, self.min.y, self.max.y),
			axis(p.z, self.min.z, self.max.z),
		)
	}
}

/// A position on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance along the view direction; larger is further away.
	pub depth: f64,
	/// Screen pixels per normalized scene unit at this depth.
	pub k: f64,
}

/// Nearest depth still drawn.
const NEAR: f64 = 0.05;

/// Precomputed view basis for one frame.
#[derive(Clone, Debug)]
pub struct Projector {
	bounds: SceneBounds,
	eye: Vec3,
	forward: Vec3,
	right: Vec3,
	up: Vec3,
	focal: f64,
	cx: f64,
	cy: f64,
}

impl Projector {
	pub fn new(camera: &Camera, bounds: SceneBounds, width: f64, height: f64) -> Self {
		let forward = camera.center.sub(camera.eye).normalized();
		let mut right = forward.cross(camera.up).normalized();
		if right.length() < 1e-9 {
			// Looking straight along `up`.
			right = Vec3::new(1.0, 0.0, 0.0);
		}
		let up = right.cross(forward);
		Self {
			bounds,
			eye: camera.eye,
			forward,
			right,
			up,
			focal: 0.6 * width.min(height),
			cx: width / 2.0,
			cy: height / 2.0,
		}
	}

	pub fn project(&self, p: Position) -> Option<Projected> {
		self.project_normalized(self.bounds.normalize(p))
	}

	pub fn project_normalized(&self, v: Vec3) -> Option<Projected> {
		let d = v.sub(self.eye);
		let depth = d.dot(self.forward);
		if depth < NEAR {
			return None;
		}
		let k = self.focal / depth;
		Some(Projected {
			x: self.cx + d.dot(self.right) * k,
			y: self.cy - d.dot(self.up) * k,
			depth,
			k,
		})
	}

	pub fn bounds(&self) -> &SceneBounds {
		&self.bounds
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn bounds() -> SceneBounds {
		SceneBounds {
			min: Position { x: 0.0, y: -1.0, z: 0.0 },
			max: Position { x: 4.0, y: 1.0, z: 2.0 },
		}
	}

	#[test]
	fn center_projects_to_canvas_center() {
		let projector = Projector::new(&Camera::default(), bounds(), 800.0, 600.0);
		let p = projector
			.project(Position { x: 2.0, y: 0.0, z: 1.0 })
			.unwrap();
		assert!((p.x - 400.0).abs() < 1e-9);
		assert!((p.y - 300.0).abs() < 1e-9);
		assert!((p.depth - Camera::default().distance()).abs() < 1e-9);
	}

	#[test]
	fn higher_layers_draw_higher_on_screen() {
		let projector = Projector::new(&Camera::default(), bounds(), 800.0, 600.0);
		let low = projector.project(Position { x: 2.0, y: 0.0, z: 0.0 }).unwrap();
		let high = projector.project(Position { x: 2.0, y: 0.0, z: 2.0 }).unwrap();
		assert!(high.y < low.y);
	}

	#[test]
	fn orbit_keeps_distance_and_zoom_clamps() {
		let mut camera = Camera::default();
		let r = camera.distance();
		camera.orbit(120.0, -40.0);
		assert!((camera.distance() - r).abs() < 1e-9);

		camera.zoom(0.01);
		assert!((camera.distance() - MIN_DISTANCE).abs() < 1e-9);
		camera.zoom(1000.0);
		assert!((camera.distance() - MAX_DISTANCE).abs() < 1e-9);
	}

	#[test]
	fn points_behind_the_eye_are_culled() {
		let camera = Camera::default();
		let projector = Projector::new(&camera, bounds(), 800.0, 600.0);
		assert!(projector.project_normalized(camera.eye.scale(2.0)).is_none());
	}

	#[test]
	fn camera_round_trips_as_json() {
		let camera = Camera::default();
		let json = serde_json::to_string(&camera).unwrap();
		assert_eq!(serde_json::from_str::<Camera>(&json).unwrap(), camera);
	}
}
