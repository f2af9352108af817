//! Chart View: one chart bound to its own surface and controls.
//!
//! ```
//! # use dash_charts::chart::{ChartContext, ChartSpec, ChartView, Dataset, InteractionProfile, PanZoomOptions, SvgSurface};
//! # use dash_charts::models::TimeSeries;
//! # use dash_charts::viz::RenderKind;
//! # use dash_charts::viz_style::DatasetStyle;
//! let series = TimeSeries::new(vec!["2024-01-01".into(), "2024-01-02".into()], vec![5.0, 7.0])?;
//! let spec = ChartSpec::new(
//!     "issues",
//!     RenderKind::Line,
//!     "Issues",
//!     vec![Dataset::new("issues open", series, DatasetStyle::palette(0))],
//!     InteractionProfile::PanZoom(PanZoomOptions::detailed_daily()),
//! )?;
//! let ctx = ChartContext::new(SvgSurface::new("issues", 800, 400))
//!     .with_controls("issues_reset", "issues_toggle_zoom");
//! let mut view = ChartView::new(spec, ctx)?;
//! assert!(!view.wheel_zoom_enabled());
//! assert!(view.toggle_wheel_zoom()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::frame::RenderedChart;
use super::interaction::{AxisState, Gesture, InteractionState, ViewWindow};
use super::spec::ChartSpec;
use super::surface::{RenderSurface, SvgSurface};
use crate::error::ChartError;
use crate::page::Page;

/// Element id of the "reset zoom" control for a surface.
pub fn reset_control_id(surface_id: &str) -> String {
    format!("{surface_id}_reset")
}

/// Element id of the "toggle zoom" control for a surface.
pub fn toggle_control_id(surface_id: &str) -> String {
    format!("{surface_id}_toggle_zoom")
}

/// Explicit per-chart context: the surface plus the ids of its bound controls.
#[derive(Debug, Clone)]
pub struct ChartContext<S: RenderSurface = SvgSurface> {
    pub surface: S,
    pub reset_control: Option<String>,
    pub toggle_control: Option<String>,
}

impl<S: RenderSurface> ChartContext<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            reset_control: None,
            toggle_control: None,
        }
    }

    pub fn with_controls(mut self, reset: impl Into<String>, toggle: impl Into<String>) -> Self {
        self.reset_control = Some(reset.into());
        self.toggle_control = Some(toggle.into());
        self
    }

    /// Resolve the surface (and, for interactive charts, both controls) on `page`.
    ///
    /// ### Errors
    /// `MissingElement` for the first absent id; nothing is constructed in that case.
    pub fn bind(
        page: &Page,
        surface_id: &str,
        interactive: bool,
        make_surface: impl FnOnce(String) -> S,
    ) -> Result<Self, ChartError> {
        let surface = page.require(surface_id)?;
        let ctx = Self::new(make_surface(surface));
        if !interactive {
            return Ok(ctx);
        }
        let reset = page.require(&reset_control_id(surface_id))?;
        let toggle = page.require(&toggle_control_id(surface_id))?;
        Ok(ctx.with_controls(reset, toggle))
    }
}

#[derive(Debug)]
pub struct ChartView<S: RenderSurface = SvgSurface> {
    spec: ChartSpec,
    frame: RenderedChart,
    ctx: ChartContext<S>,
    state: Option<InteractionState>,
}

impl<S: RenderSurface> ChartView<S> {
    /// Construct and draw the chart. Interactive charts start in `Default × WheelOff`.
    pub fn new(spec: ChartSpec, mut ctx: ChartContext<S>) -> Result<Self, ChartError> {
        if ctx.surface.id() != spec.surface_id() {
            return Err(ChartError::MissingElement(spec.surface_id().to_string()));
        }
        let frame = RenderedChart::from_spec(&spec);
        let state = match spec.profile().pan_zoom() {
            Some(options) => {
                if ctx.reset_control.is_none() {
                    return Err(ChartError::MissingElement(reset_control_id(
                        spec.surface_id(),
                    )));
                }
                if ctx.toggle_control.is_none() {
                    return Err(ChartError::MissingElement(toggle_control_id(
                        spec.surface_id(),
                    )));
                }
                Some(InteractionState::new(*options, frame.window))
            }
            None => None,
        };
        ctx.surface.set_wheel_zoom(false);
        ctx.surface.reset_view();
        ctx.surface.draw(&frame)?;
        log::debug!(
            "{}: rendered {:?} chart with {} dataset(s)",
            spec.surface_id(),
            spec.kind(),
            spec.datasets().len()
        );
        Ok(Self {
            spec,
            frame,
            ctx,
            state,
        })
    }

    pub fn id(&self) -> &str {
        self.spec.surface_id()
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn frame(&self) -> &RenderedChart {
        &self.frame
    }

    pub fn surface(&self) -> &S {
        &self.ctx.surface
    }

    pub fn interaction(&self) -> Option<&InteractionState> {
        self.state.as_ref()
    }

    pub fn wheel_zoom_enabled(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(InteractionState::wheel_zoom_enabled)
    }

    pub fn axis_state(&self) -> AxisState {
        self.state
            .as_ref()
            .map_or(AxisState::Default, InteractionState::axis_state)
    }

    /// Currently visible window.
    pub fn window(&self) -> ViewWindow {
        self.state
            .as_ref()
            .map_or(self.frame.window, InteractionState::window)
    }

    /// Flip wheel zoom on both the stored state and the live surface. Returns the new flag.
    pub fn toggle_wheel_zoom(&mut self) -> Result<bool, ChartError> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| ChartError::NotInteractive(self.spec.surface_id().to_string()))?;
        let enabled = state.toggle_wheel_zoom();
        self.ctx.surface.set_wheel_zoom(enabled);
        log::debug!("{}: wheel zoom {}", self.spec.surface_id(), enabled);
        Ok(enabled)
    }

    /// Restore the default view. Wheel zoom is left as it is; a no-op when already default.
    pub fn reset_zoom(&mut self) -> Result<(), ChartError> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| ChartError::NotInteractive(self.spec.surface_id().to_string()))?;
        if state.reset() {
            self.ctx.surface.reset_view();
            self.ctx.surface.draw(&self.frame)?;
        }
        Ok(())
    }

    /// Route a pointer/touch gesture. Returns `true` when the view changed.
    ///
    /// Non-interactive charts ignore every gesture.
    pub fn handle(&mut self, gesture: Gesture) -> Result<bool, ChartError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(false);
        };
        if !state.apply(gesture) {
            return Ok(false);
        }
        self.ctx.surface.set_window(state.window());
        self.ctx.surface.draw(&self.frame)?;
        Ok(true)
    }

    /// Dispatch a click on one of this chart's bound controls.
    pub fn activate(&mut self, control_id: &str) -> Result<(), ChartError> {
        if self.ctx.reset_control.as_deref() == Some(control_id) {
            self.reset_zoom()
        } else if self.ctx.toggle_control.as_deref() == Some(control_id) {
            self.toggle_wheel_zoom().map(|_| ())
        } else {
            Err(ChartError::UnknownControl {
                surface: self.spec.surface_id().to_string(),
                control: control_id.to_string(),
            })
        }
    }
}
