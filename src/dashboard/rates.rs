//! CSV exchange-rate dashboard: target dropdown + interval radio.

use crate::app::pipeline::rates_view;
use crate::dashboard::{Control, ControlKind, ControlOption, Dashboard, Layout, View};
use crate::domain::Frequency;
use crate::error::AppError;
use crate::io::ingest::Dataset;

pub const TITLE: &str = "Currency Exchange Rate Analysis Dashboard";

/// Owns the combined dataset for the lifetime of the dashboard.
pub struct RatesDashboard {
    dataset: Dataset,
    default_target: Option<String>,
    default_frequency: Frequency,
}

impl RatesDashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            default_target: None,
            default_frequency: Frequency::Weekly,
        }
    }

    /// Preselect a target and interval; the target must occur in the dataset.
    pub fn with_defaults(mut self, target: Option<String>, frequency: Frequency) -> Result<Self, AppError> {
        if let Some(target) = &target {
            if !self.dataset.observations.iter().any(|o| &o.target == target) {
                return Err(AppError::new(
                    3,
                    format!(
                        "No observations for target '{target}'. Available: {}.",
                        self.dataset.targets().join(", ")
                    ),
                ));
            }
        }
        self.default_target = target;
        self.default_frequency = frequency;
        Ok(self)
    }
}

impl Dashboard for RatesDashboard {
    fn layout(&self) -> Layout {
        let targets = self.dataset.targets();
        let default_target = self
            .default_target
            .clone()
            .or_else(|| targets.first().cloned())
            .unwrap_or_default();

        let target = Control::new(
            "currency-pair-dropdown",
            "Target",
            ControlKind::Dropdown,
            targets.iter().map(|t| ControlOption::new(t, t)).collect(),
            &default_target,
        );

        let interval = Control::new(
            "time-interval-radio",
            "Interval",
            ControlKind::Radio,
            Frequency::ALL
                .iter()
                .map(|f| ControlOption::new(f.display_name(), f.code()))
                .collect(),
            self.default_frequency.code(),
        );

        Layout {
            title: TITLE.to_string(),
            controls: vec![target, interval],
        }
    }

    fn update(&self, values: &[&str]) -> Result<View, AppError> {
        let [target, interval] = values else {
            return Err(AppError::new(2, "Rates dashboard expects two control values."));
        };
        let frequency = Frequency::from_code(interval)
            .ok_or_else(|| AppError::new(2, format!("Unknown interval '{interval}'.")))?;

        let view = rates_view(&self.dataset, target, frequency)?;
        Ok(View {
            figure: view.figure,
            message: view.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Session;
    use crate::domain::SchemaOverrides;
    use crate::io::ingest::read_observations;

    fn dashboard() -> RatesDashboard {
        let csv = "Date,TargetCurrency,ExchangeRate\n\
                   2023-01-02,GBP,0.83\n\
                   2023-01-02,EUR,0.94\n\
                   2023-02-14,EUR,0.93\n\
                   2023-05-20,EUR,0.91\n\
                   2023-05-21,GBP,0.80\n";
        let data = read_observations(csv.as_bytes(), "r.csv", &SchemaOverrides::default()).unwrap();
        RatesDashboard::new(Dataset::combine(vec![data]).unwrap())
    }

    #[test]
    fn layout_lists_targets_in_file_order() {
        let layout = dashboard().layout();
        assert_eq!(layout.title, TITLE);
        let target = &layout.controls[0];
        assert_eq!(target.kind, ControlKind::Dropdown);
        assert_eq!(target.value(), "GBP");
        assert_eq!(target.options.len(), 2);

        let interval = &layout.controls[1];
        assert_eq!(interval.kind, ControlKind::Radio);
        assert_eq!(interval.value(), "W");
        let codes: Vec<&str> = interval.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(codes, vec!["W", "M", "Q", "Y"]);
    }

    #[test]
    fn defaults_can_be_overridden() {
        let layout = dashboard()
            .with_defaults(Some("EUR".to_string()), Frequency::Quarterly)
            .unwrap()
            .layout();
        assert_eq!(layout.controls[0].value(), "EUR");
        assert_eq!(layout.controls[1].value(), "Q");
    }

    #[test]
    fn callback_reacts_to_controls() {
        let mut session = Session::start(
            dashboard()
                .with_defaults(Some("EUR".to_string()), Frequency::Monthly)
                .unwrap(),
        );
        assert_eq!(
            session.view().unwrap().message,
            "Highest rate on 2023-01-31, Lowest rate on 2023-05-31"
        );

        // Monthly -> Quarterly: Q1 mean 0.935, Q2 0.91.
        session.adjust(1, 1);
        let view = session.view().unwrap();
        assert_eq!(view.message, "Highest rate on 2023-03-31, Lowest rate on 2023-06-30");
        assert_eq!(view.figure.title, "EUR Exchange Rate Over Time");

        // EUR -> GBP.
        session.adjust(0, 1);
        assert_eq!(session.values(), vec!["GBP", "Q"]);
        assert!(session.error().is_none());
    }

    #[test]
    fn unknown_default_target_is_rejected() {
        let err = dashboard()
            .with_defaults(Some("CHF".to_string()), Frequency::Weekly)
            .err()
            .unwrap();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("GBP, EUR"));
    }

    #[test]
    fn bad_values_are_errors() {
        let d = dashboard();
        assert_eq!(d.update(&["EUR"]).unwrap_err().exit_code(), 2);
        assert_eq!(d.update(&["EUR", "D"]).unwrap_err().exit_code(), 2);
        assert_eq!(d.update(&["CHF", "W"]).unwrap_err().exit_code(), 3);
    }
}
