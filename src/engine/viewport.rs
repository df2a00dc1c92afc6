//! Camera transform and pan/zoom gesture handling.

/// Pan+zoom affine transform from world (simulation) coordinates to screen
/// pixels: `screen = world * k + (x, y)`. `k` stays positive; nothing is
/// clamped beyond that, so arbitrary zoom and pan are allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	/// Screen-space x translation.
	pub x: f64,
	/// Screen-space y translation.
	pub y: f64,
	/// Uniform scale factor, always positive.
	pub k: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Owns the [`Camera`]; the only component allowed to mutate it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Viewport {
	camera: Camera,
}

impl Viewport {
	pub fn camera(&self) -> Camera {
		self.camera
	}

	/// Translate the camera by a screen-space delta.
	pub fn pan(&mut self, dx: f64, dy: f64) {
		self.camera.x += dx;
		self.camera.y += dy;
	}

	/// Scale the camera by a positive factor about a screen-space pivot, so
	/// the world point currently under the pivot stays put on screen.
	pub fn zoom(&mut self, factor: f64, pivot: (f64, f64)) {
		if factor <= 0.0 || factor == 1.0 {
			return;
		}
		let (px, py) = pivot;
		self.camera.x = px - (px - self.camera.x) * factor;
		self.camera.y = py - (py - self.camera.y) * factor;
		self.camera.k *= factor;
	}

	/// Combined gesture entry point: pan by `(dx, dy)` then scale by the
	/// multiplicative `scale` factor about `pivot`.
	pub fn apply_gesture(&mut self, dx: f64, dy: f64, scale: f64, pivot: (f64, f64)) {
		self.pan(dx, dy);
		self.zoom(scale, pivot);
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.camera.x) / self.camera.k,
			(sy - self.camera.y) / self.camera.k,
		)
	}

	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(
			wx * self.camera.k + self.camera.x,
			wy * self.camera.k + self.camera.y,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pan_translates_without_scaling() {
		let mut vp = Viewport::default();
		vp.pan(10.0, -4.0);
		assert_eq!(vp.camera(), Camera { x: 10.0, y: -4.0, k: 1.0 });
	}

	#[test]
	fn zoom_keeps_the_pivot_point_stationary() {
		let mut vp = Viewport::default();
		vp.apply_gesture(35.0, -12.0, 1.7, (200.0, 150.0));
		let pivot = (80.0, 90.0);
		let world = vp.screen_to_world(pivot.0, pivot.1);
		vp.zoom(1.25, pivot);
		let (sx, sy) = vp.world_to_screen(world.0, world.1);
		assert!((sx - pivot.0).abs() < 1e-9);
		assert!((sy - pivot.1).abs() < 1e-9);
	}

	#[test]
	fn zoom_is_unclamped() {
		let mut vp = Viewport::default();
		for _ in 0..100 {
			vp.zoom(10.0, (0.0, 0.0));
		}
		assert!(vp.camera().k > 1e50);
		for _ in 0..200 {
			vp.zoom(0.1, (0.0, 0.0));
		}
		assert!(vp.camera().k < 1e-40);
		assert!(vp.camera().k > 0.0);
	}

	#[test]
	fn screen_world_round_trip() {
		let mut vp = Viewport::default();
		vp.apply_gesture(5.0, 7.0, 2.5, (30.0, 40.0));
		let (wx, wy) = vp.screen_to_world(123.0, -45.0);
		let (sx, sy) = vp.world_to_screen(wx, wy);
		assert!((sx - 123.0).abs() < 1e-9);
		assert!((sy + 45.0).abs() < 1e-9);
	}

	#[test]
	fn non_positive_scale_is_ignored() {
		let mut vp = Viewport::default();
		vp.zoom(0.0, (10.0, 10.0));
		vp.zoom(-2.0, (10.0, 10.0));
		assert_eq!(vp.camera(), Camera::default());
	}
}
