use log::debug;
use web_sys::{DomRect, HtmlImageElement};

use super::viewport::ViewTransform;

/// Native size of the bundled world map, used until the image reports its own.
pub const DEFAULT_MAP_SIZE: (f64, f64) = (2000.0, 857.0);

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SyncError {
	#[error("map image has no rendered box yet ({width}x{height})")]
	NotLaidOut { width: f64, height: f64 },
	#[error("map image is not attached to a container")]
	Detached,
}

/// Client-space box as reported by layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutBox {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl From<DomRect> for LayoutBox {
	fn from(rect: DomRect) -> Self {
		Self {
			left: rect.left(),
			top: rect.top(),
			width: rect.width(),
			height: rect.height(),
		}
	}
}

impl LayoutBox {
	/// Removes `transform` from a measured box, leaving the box layout assigned before any
	/// CSS transform. The transform scales about the box center, then translates.
	pub fn untransformed(self, transform: &ViewTransform) -> Self {
		let k = transform.k;
		let (width, height) = (self.width / k, self.height / k);
		Self {
			left: self.left + (self.width - width) / 2.0 - k * transform.x,
			top: self.top + (self.height - height) / 2.0 - k * transform.y,
			width,
			height,
		}
	}
}

/// The overlay's box, relative to the shared container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayFrame {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl OverlayFrame {
	pub fn relative_to(image: LayoutBox, container: LayoutBox) -> Result<Self, SyncError> {
		if image.width <= 0.0 || image.height <= 0.0 {
			return Err(SyncError::NotLaidOut {
				width: image.width,
				height: image.height,
			});
		}
		Ok(Self {
			left: image.left - container.left,
			top: image.top - container.top,
			width: image.width,
			height: image.height,
		})
	}

	pub fn css(&self) -> String {
		format!(
			"width: {}px; height: {}px; left: {}px; top: {}px;",
			self.width, self.height, self.left, self.top
		)
	}
}

/// Anything that can report the rendered image box and its container box.
///
/// The image box is the on-screen box, including whatever transform the image carries.
pub trait FrameSource {
	fn image_box(&self) -> LayoutBox;
	fn container_box(&self) -> Result<LayoutBox, SyncError>;
}

impl FrameSource for HtmlImageElement {
	fn image_box(&self) -> LayoutBox {
		self.get_bounding_client_rect().into()
	}

	fn container_box(&self) -> Result<LayoutBox, SyncError> {
		self.parent_element()
			.map(|parent| parent.get_bounding_client_rect().into())
			.ok_or(SyncError::Detached)
	}
}

/// Keeps the overlay frame equal to the map image's rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySynchronizer {
	frame: Option<OverlayFrame>,
	native_size: (f64, f64),
}

impl Default for OverlaySynchronizer {
	fn default() -> Self {
		Self {
			frame: None,
			native_size: DEFAULT_MAP_SIZE,
		}
	}
}

impl OverlaySynchronizer {
	pub fn frame(&self) -> Option<OverlayFrame> {
		self.frame
	}

	/// Coordinate system of the overlay: the image's decoded pixel size.
	pub fn native_size(&self) -> (f64, f64) {
		self.native_size
	}

	pub fn view_box(&self) -> String {
		format!("0 0 {} {}", self.native_size.0, self.native_size.1)
	}

	/// Re-measures the image, which is drawn with `transform`. Leaves the previous frame in
	/// place when layout is not ready.
	pub fn sync(&mut self, source: &impl FrameSource, transform: &ViewTransform) -> Option<OverlayFrame> {
		let measured = source.container_box().and_then(|container| {
			OverlayFrame::relative_to(source.image_box().untransformed(transform), container)
		});
		match measured {
			Ok(frame) => {
				self.frame = Some(frame);
				Some(frame)
			}
			Err(err) => {
				debug!("overlay sync skipped: {err}");
				None
			}
		}
	}

	pub fn image_loaded(
		&mut self,
		natural_width: f64,
		natural_height: f64,
		source: &impl FrameSource,
		transform: &ViewTransform,
	) -> Option<OverlayFrame> {
		if natural_width > 0.0 && natural_height > 0.0 {
			self.native_size = (natural_width, natural_height);
		}
		self.sync(source, transform)
	}
}
