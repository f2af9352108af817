//! Rendering surfaces.
//!
//! A chart never reaches into the renderer's configuration; it talks to its surface
//! through [`RenderSurface`] only.

use super::frame::RenderedChart;
use super::interaction::ViewWindow;
use crate::viz;
use anyhow::Result;
use std::path::Path;

/// Narrow capability interface a chart needs from whatever draws it.
pub trait RenderSurface {
    /// Page element id the surface is bound to.
    fn id(&self) -> &str;

    /// Live zoom configuration: whether the next wheel event zooms.
    fn set_wheel_zoom(&mut self, enabled: bool);

    fn wheel_zoom(&self) -> bool;

    /// Restore the fully zoomed-out view.
    fn reset_view(&mut self);

    /// Show a specific window.
    fn set_window(&mut self, window: ViewWindow);

    /// Draw `frame` with the surface's current window.
    fn draw(&mut self, frame: &RenderedChart) -> Result<()>;
}

/// In-memory SVG surface backed by plotters.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    id: String,
    width: u32,
    height: u32,
    locale: String,
    wheel_zoom: bool,
    window: Option<ViewWindow>,
    markup: String,
    draws: usize,
}

impl SvgSurface {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            locale: "en".into(),
            wheel_zoom: false,
            window: None,
            markup: String::new(),
            draws: 0,
        }
    }

    /// Locale tag for tick labels (`en`, `de`, ...).
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// SVG document of the last draw (empty before the first draw).
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Window used for the next draw; `None` means the frame's default extent.
    pub fn window(&self) -> Option<ViewWindow> {
        self.window
    }

    /// Number of completed draws.
    pub fn draw_count(&self) -> usize {
        self.draws
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.markup)?;
        Ok(())
    }
}

impl RenderSurface for SvgSurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_wheel_zoom(&mut self, enabled: bool) {
        self.wheel_zoom = enabled;
    }

    fn wheel_zoom(&self) -> bool {
        self.wheel_zoom
    }

    fn reset_view(&mut self) {
        self.window = None;
    }

    fn set_window(&mut self, window: ViewWindow) {
        self.window = Some(window);
    }

    fn draw(&mut self, frame: &RenderedChart) -> Result<()> {
        let window = self.window.unwrap_or(frame.window);
        let mut out = String::new();
        viz::render_svg_string(
            frame,
            window,
            &mut out,
            self.width,
            self.height,
            &self.locale,
        )?;
        self.markup = out;
        self.draws += 1;
        log::debug!("{}: drew frame #{}", self.id, self.draws);
        Ok(())
    }
}
