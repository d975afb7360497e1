use super::types::{Bounds, Point};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP: f64 = 1.2;
pub const TRANSFORM_ORIGIN: &str = "center center";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub zoom_step: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_zoom: MIN_ZOOM,
			max_zoom: MAX_ZOOM,
			zoom_step: ZOOM_STEP,
		}
	}
}

/// Scale about the frame center, then translate. Shared by the map image and the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub k: f64,
	pub x: f64,
	pub y: f64,
}

impl ViewTransform {
	pub fn css(&self) -> String {
		format!("scale({}) translate({}px, {}px)", self.k, self.x, self.y)
	}

	/// Maps a frame-local point to where it is drawn, for a frame of `width` x `height`.
	pub fn apply(&self, p: Point, width: f64, height: f64) -> Point {
		let (cx, cy) = (width / 2.0, height / 2.0);
		Point::new(
			cx + self.k * (p.x + self.x - cx),
			cy + self.k * (p.y + self.y - cy),
		)
	}

	pub fn invert(&self, p: Point, width: f64, height: f64) -> Point {
		let (cx, cy) = (width / 2.0, height / 2.0);
		Point::new(
			(p.x - cx) / self.k + cx - self.x,
			(p.y - cy) / self.k + cy - self.y,
		)
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportTransform {
	config: ViewportConfig,
	zoom: f64,
	pan_x: f64,
	pan_y: f64,
	pub pan: PanState,
}

impl Default for ViewportTransform {
	fn default() -> Self {
		Self::new(ViewportConfig::default())
	}
}

impl ViewportTransform {
	pub fn new(config: ViewportConfig) -> Self {
		Self {
			config,
			zoom: 1.0_f64.clamp(config.min_zoom, config.max_zoom),
			pan_x: 0.0,
			pan_y: 0.0,
			pan: PanState::default(),
		}
	}

	pub fn zoom(&self) -> f64 {
		self.zoom
	}

	pub fn offset(&self) -> (f64, f64) {
		(self.pan_x, self.pan_y)
	}

	/// Returns `false` when already at the upper bound.
	pub fn zoom_in(&mut self) -> bool {
		if self.zoom >= self.config.max_zoom {
			return false;
		}
		self.zoom = (self.zoom * self.config.zoom_step).min(self.config.max_zoom);
		true
	}

	/// Returns `false` when already at the lower bound.
	pub fn zoom_out(&mut self) -> bool {
		if self.zoom <= self.config.min_zoom {
			return false;
		}
		self.zoom = (self.zoom / self.config.zoom_step).max(self.config.min_zoom);
		true
	}

	pub fn reset(&mut self) {
		self.zoom = 1.0_f64.clamp(self.config.min_zoom, self.config.max_zoom);
		self.pan_x = 0.0;
		self.pan_y = 0.0;
	}

	/// Accumulates a screen-space delta as image-space pan.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.pan_x += dx / self.zoom;
		self.pan_y += dy / self.zoom;
	}

	pub fn can_drag(&self) -> bool {
		self.zoom > 1.0
	}

	/// Starts a drag session. Refused unless zoomed in.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		if !self.can_drag() {
			return false;
		}
		self.pan = PanState {
			active: true,
			last_x: x,
			last_y: y,
		};
		true
	}

	pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
		if !self.pan.active {
			return false;
		}
		let (dx, dy) = (x - self.pan.last_x, y - self.pan.last_y);
		self.pan.last_x = x;
		self.pan.last_y = y;
		self.pan_by(dx, dy);
		true
	}

	pub fn end_drag(&mut self) {
		self.pan.active = false;
	}

	pub fn composed_transform(&self) -> ViewTransform {
		ViewTransform {
			k: self.zoom,
			x: self.pan_x,
			y: self.pan_y,
		}
	}

	/// Image-space rectangle visible inside a frame of the given size.
	pub fn visible_region(&self, width: f64, height: f64) -> Bounds {
		let t = self.composed_transform();
		Bounds {
			min: t.invert(Point::new(0.0, 0.0), width, height),
			max: t.invert(Point::new(width, height), width, height),
		}
	}

	pub fn cursor(&self) -> &'static str {
		if self.pan.active {
			"grabbing"
		} else if self.can_drag() {
			"grab"
		} else {
			"default"
		}
	}

	pub fn zoom_label(&self) -> String {
		format!("{}%", (self.zoom * 100.0).round())
	}
}
