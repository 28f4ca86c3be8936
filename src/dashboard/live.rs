//! Live exchange-rate dashboard: base and target dropdowns.

use crate::app::pipeline::live_view;
use crate::dashboard::{Control, ControlKind, ControlOption, Dashboard, Layout, View};
use crate::data::{CURRENCIES, RateProvider, dropdown_label, validate_code};
use crate::error::AppError;

pub const TITLE: &str = "Live Currency Exchange Rate Dashboard";

pub const DEFAULT_BASE: &str = "USD";
pub const DEFAULT_TARGET: &str = "EUR";

pub struct LiveDashboard<P: RateProvider> {
    provider: P,
    base: String,
    target: String,
}

impl<P: RateProvider> LiveDashboard<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            base: DEFAULT_BASE.to_string(),
            target: DEFAULT_TARGET.to_string(),
        }
    }

    /// Preselect a pair; both codes must be in the currency table.
    pub fn with_pair(mut self, base: &str, target: &str) -> Result<Self, AppError> {
        self.base = validate_code(base)?.to_string();
        self.target = validate_code(target)?.to_string();
        Ok(self)
    }
}

fn currency_options() -> Vec<ControlOption> {
    CURRENCIES
        .iter()
        .map(|(code, _)| ControlOption::new(dropdown_label(code), *code))
        .collect()
}

impl<P: RateProvider> Dashboard for LiveDashboard<P> {
    fn layout(&self) -> Layout {
        Layout {
            title: TITLE.to_string(),
            controls: vec![
                Control::new("base-currency", "Base", ControlKind::Dropdown, currency_options(), &self.base),
                Control::new(
                    "target-currency",
                    "Target",
                    ControlKind::Dropdown,
                    currency_options(),
                    &self.target,
                ),
            ],
        }
    }

    fn update(&self, values: &[&str]) -> Result<View, AppError> {
        let [base, target] = values else {
            return Err(AppError::new(2, "Live dashboard expects two control values."));
        };
        let view = live_view(&self.provider, base, target)?;
        Ok(View {
            figure: view.figure,
            message: view.message,
        })
    }
}
