//! Reactive dashboard model.
//!
//! A dashboard declares its layout (title + input controls) once and exposes a
//! single callback that maps the current control values to a `View`. A
//! `Session` holds the live control state, re-runs the callback whenever a
//! control changes, and keeps the last good view when the callback fails.
//!
//! Nothing here knows about terminals; the TUI only renders a `Session`.

use crate::domain::Figure;
use crate::error::AppError;

pub mod live;
pub mod rates;

pub use live::LiveDashboard;
pub use rates::RatesDashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// One value visible at a time, cycled with left/right.
    Dropdown,
    /// All options visible, one marked as selected.
    Radio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlOption {
    pub label: String,
    pub value: String,
}

impl ControlOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
    pub options: Vec<ControlOption>,
    pub selected: usize,
}

impl Control {
    /// Build a control with `default` selected (falls back to the first option).
    pub fn new(
        id: &'static str,
        label: &'static str,
        kind: ControlKind,
        options: Vec<ControlOption>,
        default: &str,
    ) -> Self {
        let selected = options.iter().position(|o| o.value == default).unwrap_or(0);
        Self {
            id,
            label,
            kind,
            options,
            selected,
        }
    }

    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|o| o.label.as_str())
            .unwrap_or("-")
    }

    /// Move the selection by `delta`, wrapping around. Returns whether it changed.
    pub fn step(&mut self, delta: i32) -> bool {
        let n = self.options.len();
        if n < 2 || delta == 0 {
            return false;
        }
        let shift = (delta.unsigned_abs() as usize) % n;
        self.selected = if delta > 0 {
            (self.selected + shift) % n
        } else {
            (self.selected + n - shift) % n
        };
        shift != 0
    }
}

/// Declared page: title plus controls in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub title: String,
    pub controls: Vec<Control>,
}

/// Callback output: replacement chart and replacement text.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub figure: Figure,
    pub message: String,
}

pub trait Dashboard {
    /// Declare the page once at startup.
    fn layout(&self) -> Layout;

    /// Recompute the view from the current control values (in layout order).
    fn update(&self, values: &[&str]) -> Result<View, AppError>;
}

/// Live control state for one dashboard.
pub struct Session<D: Dashboard> {
    dashboard: D,
    layout: Layout,
    view: Option<View>,
    error: Option<AppError>,
}

impl<D: Dashboard> Session<D> {
    /// Declare the layout and run the callback once with the defaults.
    pub fn start(dashboard: D) -> Self {
        let layout = dashboard.layout();
        let mut session = Self {
            dashboard,
            layout,
            view: None,
            error: None,
        };
        session.refresh();
        session
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Error from the most recent callback, if it failed.
    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn values(&self) -> Vec<&str> {
        self.layout.controls.iter().map(Control::value).collect()
    }

    /// Change control `index` by `delta` and re-run the callback if it changed.
    pub fn adjust(&mut self, index: usize, delta: i32) {
        let changed = self
            .layout
            .controls
            .get_mut(index)
            .is_some_and(|c| c.step(delta));
        if changed {
            self.refresh();
        }
    }

    /// Re-run the callback with the current values.
    pub fn refresh(&mut self) {
        let result = {
            let values = self.values();
            self.dashboard.update(&values)
        };
        match result {
            Ok(view) => {
                self.view = Some(view);
                self.error = None;
            }
            Err(err) => {
                log::error!("{} update failed: {err}", self.layout.title);
                self.error = Some(err);
            }
        }
    }
}
