use thiserror::Error;
use tracing::debug;

use crate::{
    encoding::{StationMarker, markers},
    repository::Repository,
    shared::{TimeFilter, Viewport},
    traffic::Traffic,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Slider value {0} is outside -1..=1439")]
    SliderOutOfRange(i32),
}

/// One full redraw of the station layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub filter: TimeFilter,
    /// `"any time"` or the selected `HH:MM`.
    pub time_label: String,
    pub markers: Vec<StationMarker>,
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

impl<F> Renderer for F
where
    F: FnMut(&Frame),
{
    fn draw(&mut self, frame: &Frame) {
        self(frame)
    }
}

/// Map session state driven by load, move and slider events. Every event
/// ends in exactly one synchronous draw.
pub struct Session<R: Renderer> {
    repository: Repository,
    traffic: Traffic,
    viewport: Viewport,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        Self {
            repository: Repository::new(),
            traffic: Traffic::default(),
            viewport,
            renderer,
        }
    }

    /// Data is resident, roll up with the current filter and draw.
    pub fn on_load(&mut self, repository: Repository) {
        debug!(
            "Session loaded {} stations and {} trips",
            repository.stations().len(),
            repository.trips().len()
        );
        self.repository = repository;
        self.traffic = self.repository.traffic(self.traffic.filter());
        self.redraw();
    }

    /// Pan or zoom. Counters are unchanged so only positions are recomputed.
    pub fn on_move(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.redraw();
    }

    pub fn on_slider(&mut self, value: i32) -> Result<(), self::Error> {
        let filter = TimeFilter::from_slider(value).ok_or(Error::SliderOutOfRange(value))?;
        self.traffic = self.repository.traffic(filter);
        self.redraw();
        Ok(())
    }

    pub fn redraw(&mut self) {
        let frame = Frame {
            filter: self.traffic.filter(),
            time_label: self.traffic.filter().to_string(),
            markers: markers(&self.traffic, &self.viewport),
        };
        self.renderer.draw(&frame);
    }

    pub fn filter(&self) -> TimeFilter {
        self.traffic.filter()
    }

    pub fn traffic(&self) -> &Traffic {
        &self.traffic
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
