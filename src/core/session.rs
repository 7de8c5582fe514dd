//! Form session state driven by discrete events.
//!
//! `reduce` is pure: it takes the current state by reference and returns the
//! next one. Prediction and tip each own a busy flag and a result slot, so the
//! two operations can be in flight at the same time without touching each
//! other's fields.

use crate::domain::model::{FormField, FormInput};
use serde::{Deserialize, Serialize};

pub const PREDICTION_FAILED_MESSAGE: &str = "Failed to get prediction. Please try again.";
pub const TIP_FAILED_MESSAGE: &str =
    "Failed to get AI tip. Please ensure you have filled the form correctly.";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub form: FormInput,
    pub prediction: Option<f64>,
    pub tip: Option<String>,
    pub predicting: bool,
    pub tip_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    FieldChanged { field: FormField, value: String },
    PredictionRequested,
    PredictionSucceeded { price: f64 },
    PredictionFailed { cause: String },
    TipRequested,
    TipSucceeded { tip: String },
    TipFailed { cause: String },
}

impl SessionState {
    pub fn new(form: FormInput) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.predicting || self.tip_loading
    }

    /// Label shown while an operation runs. The tip wins when both are busy.
    pub fn status_label(&self) -> Option<&'static str> {
        if self.tip_loading {
            Some("Generating Response...")
        } else if self.predicting {
            Some("Predicting...")
        } else {
            None
        }
    }

    pub fn formatted_prediction(&self) -> Option<String> {
        self.prediction.map(|price| format!("{:.2}", price))
    }
}

pub fn reduce(state: &SessionState, event: SessionEvent) -> SessionState {
    let mut next = state.clone();
    match event {
        SessionEvent::FieldChanged { field, value } => {
            next.form = state.form.with_field(field, value);
        }
        SessionEvent::PredictionRequested => {
            next.predicting = true;
            next.prediction = None;
            next.error = None;
        }
        SessionEvent::PredictionSucceeded { price } => {
            next.predicting = false;
            next.prediction = Some(price);
        }
        SessionEvent::PredictionFailed { cause } => {
            tracing::error!("Prediction failed: {}", cause);
            next.predicting = false;
            next.error = Some(PREDICTION_FAILED_MESSAGE.to_string());
        }
        SessionEvent::TipRequested => {
            next.tip_loading = true;
            next.tip = None;
            next.error = None;
        }
        SessionEvent::TipSucceeded { tip } => {
            next.tip_loading = false;
            next.tip = Some(tip);
        }
        SessionEvent::TipFailed { cause } => {
            tracing::error!("AI tip request failed: {}", cause);
            next.tip_loading = false;
            next.error = Some(TIP_FAILED_MESSAGE.to_string());
        }
    }
    next
}

/// Folds a sequence of events into a state.
pub fn replay(state: &SessionState, events: impl IntoIterator<Item = SessionEvent>) -> SessionState {
    events
        .into_iter()
        .fold(state.clone(), |current, event| reduce(&current, event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_change_touches_only_the_form() {
        let state = SessionState {
            prediction: Some(12_000.0),
            ..Default::default()
        };
        let next = reduce(
            &state,
            SessionEvent::FieldChanged {
                field: FormField::Brand,
                value: "honda".to_string(),
            },
        );

        assert_eq!(next.form.brand, "honda");
        assert_eq!(next.prediction, Some(12_000.0));
        assert_eq!(state.form.brand, "toyota");
    }

    #[test]
    fn test_prediction_lifecycle() {
        let start = SessionState {
            prediction: Some(1.0),
            error: Some("old".to_string()),
            ..Default::default()
        };

        let pending = reduce(&start, SessionEvent::PredictionRequested);
        assert!(pending.predicting);
        assert_eq!(pending.prediction, None);
        assert_eq!(pending.error, None);
        assert_eq!(pending.status_label(), Some("Predicting..."));

        let done = reduce(&pending, SessionEvent::PredictionSucceeded { price: 36_300.0 });
        assert!(!done.predicting);
        assert_eq!(done.formatted_prediction().as_deref(), Some("36300.00"));
        assert_eq!(done.status_label(), None);
    }

    #[test]
    fn test_failures_show_generic_messages() {
        let state = replay(
            &SessionState::default(),
            [
                SessionEvent::PredictionRequested,
                SessionEvent::PredictionFailed {
                    cause: "mileage: 'abc' is not a number".to_string(),
                },
            ],
        );
        assert_eq!(state.error.as_deref(), Some(PREDICTION_FAILED_MESSAGE));
        assert!(!state.predicting);

        let state = replay(
            &state,
            [
                SessionEvent::TipRequested,
                SessionEvent::TipFailed {
                    cause: "status 500".to_string(),
                },
            ],
        );
        assert_eq!(state.error.as_deref(), Some(TIP_FAILED_MESSAGE));
        assert!(!state.tip_loading);
    }

    #[test]
    fn test_operations_are_independent() {
        let state = replay(
            &SessionState::default(),
            [
                SessionEvent::PredictionRequested,
                SessionEvent::TipRequested,
            ],
        );
        assert!(state.predicting && state.tip_loading);
        assert_eq!(state.status_label(), Some("Generating Response..."));

        let state = reduce(
            &state,
            SessionEvent::TipSucceeded {
                tip: "Check the brakes 🚗".to_string(),
            },
        );
        assert!(state.predicting);
        assert!(!state.tip_loading);
        assert!(state.is_busy());

        let state = reduce(&state, SessionEvent::PredictionSucceeded { price: 20_000.0 });
        assert!(!state.is_busy());
        assert_eq!(state.tip.as_deref(), Some("Check the brakes 🚗"));
        assert_eq!(state.prediction, Some(20_000.0));
    }
}
