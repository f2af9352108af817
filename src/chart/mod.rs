//! Chart View component: immutable chart specs, pan/zoom state and the surfaces
//! charts draw onto.

pub mod frame;
pub mod interaction;
pub mod spec;
pub mod surface;
pub mod view;

pub use frame::{RenderedChart, RenderedDataset};
pub use interaction::{AxisState, Gesture, InteractionState, ViewWindow, WheelState};
pub use spec::{
    ChartSpec, Dataset, InteractionProfile, Modifier, Modifiers, PanZoomOptions,
};
pub use surface::{RenderSurface, SvgSurface};
pub use view::{ChartContext, ChartView, reset_control_id, toggle_control_id};
