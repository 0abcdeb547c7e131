use std::{f64::consts::PI, fmt::Display};

use serde::{Deserialize, Serialize};

pub const TILE_SIZE: f64 = 512.0;
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Position on the Web Mercator world square at `world_size` pixels.
    fn to_world(self, world_size: f64) -> (f64, f64) {
        let latitude = self
            .latitude
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
        let x = (180.0 + self.longitude) / 360.0 * world_size;
        let y = (180.0 - (180.0 / PI) * f64::ln(f64::tan(PI / 4.0 + latitude * PI / 360.0)))
            / 360.0
            * world_size;
        (x, y)
    }
}

/// Pixel position relative to the top left corner of the map container.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

pub trait Project {
    fn project(&self, coordinate: &Coordinate) -> ScreenPoint;
}

pub struct Config {
    pub center: Coordinate,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            center: Coordinate::new(42.36027, -71.09415),
            zoom: 12.0,
            min_zoom: 5.0,
            max_zoom: 18.0,
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Web Mercator viewport with 512 px tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: Coordinate,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    width: f64,
    height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Viewport {
    pub fn new(config: Config) -> Self {
        Self {
            center: config.center,
            zoom: config.zoom.clamp(config.min_zoom, config.max_zoom),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            width: config.width,
            height: config.height,
        }
    }

    pub fn with_center(mut self, center: Coordinate) -> Self {
        self.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }
}

impl Project for Viewport {
    fn project(&self, coordinate: &Coordinate) -> ScreenPoint {
        let world_size = self.world_size();
        let (x, y) = coordinate.to_world(world_size);
        let (center_x, center_y) = self.center.to_world(world_size);
        ScreenPoint {
            x: x - center_x + self.width / 2.0,
            y: y - center_y + self.height / 2.0,
        }
    }
}

#[test]
fn center_projects_to_middle() {
    let viewport = Viewport::default().with_size(800.0, 600.0);
    let point = viewport.project(&viewport.center());
    assert!((point.x - 400.0).abs() < 1e-9);
    assert!((point.y - 300.0).abs() < 1e-9);
}

#[test]
fn north_east_is_up_right() {
    let viewport = Viewport::default();
    let center = viewport.center();
    let point = viewport.project(&Coordinate::new(center.latitude + 0.01, center.longitude + 0.01));
    let middle = viewport.project(&center);
    assert!(point.x > middle.x);
    assert!(point.y < middle.y);
}

#[test]
fn zoom_is_clamped() {
    let viewport = Viewport::default().with_zoom(30.0);
    assert_eq!(viewport.zoom(), 18.0);
    let viewport = viewport.with_zoom(0.0);
    assert_eq!(viewport.zoom(), 5.0);
}

#[test]
fn zooming_in_doubles_offsets() {
    let viewport = Viewport::default().with_size(0.0, 0.0);
    let coordinate = Coordinate::new(42.37, -71.08);
    let near = viewport.project(&coordinate);
    let far = viewport.with_zoom(13.0).project(&coordinate);
    assert!((far.x - near.x * 2.0).abs() < 1e-6);
    assert!((far.y - near.y * 2.0).abs() < 1e-6);
}
