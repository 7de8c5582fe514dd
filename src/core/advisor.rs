use crate::core::estimator::PriceEstimator;
use crate::core::prompt::build_tip_prompt;
use crate::core::session::{replay, reduce, SessionEvent, SessionState};
use crate::domain::model::{FormInput, PriceEstimate};
use crate::domain::ports::{AdvisoryClient, VariationSource};
use crate::utils::error::{AdvisorError, Result};

/// Which operations a submission should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub estimate: bool,
    pub tip: bool,
}

impl Submission {
    pub fn estimate_only() -> Self {
        Self {
            estimate: true,
            tip: false,
        }
    }

    pub fn tip_only() -> Self {
        Self {
            estimate: false,
            tip: true,
        }
    }

    pub fn both() -> Self {
        Self {
            estimate: true,
            tip: true,
        }
    }
}

/// Runs price estimation and tip generation against a session.
///
/// Without a client every tip request fails with the generic tip message.
pub struct Advisor<V: VariationSource, C: AdvisoryClient> {
    estimator: PriceEstimator<V>,
    client: Option<C>,
}

impl<V: VariationSource, C: AdvisoryClient> Advisor<V, C> {
    pub fn new(estimator: PriceEstimator<V>, client: Option<C>) -> Self {
        Self { estimator, client }
    }

    pub fn estimate_form(&mut self, form: &FormInput) -> Result<PriceEstimate> {
        estimate_form(&mut self.estimator, form)
    }

    pub async fn tip_for_form(&self, form: &FormInput) -> Result<String> {
        tip_for_form(self.client.as_ref(), form).await
    }

    pub fn predict(&mut self, state: &SessionState) -> SessionState {
        let pending = reduce(state, SessionEvent::PredictionRequested);
        let outcome = prediction_event(&mut self.estimator, &pending.form);
        reduce(&pending, outcome)
    }

    pub async fn request_tip(&self, state: &SessionState) -> SessionState {
        let pending = reduce(state, SessionEvent::TipRequested);
        let outcome = tip_event(self.client.as_ref(), &pending.form).await;
        reduce(&pending, outcome)
    }

    /// Starts the requested operations together and applies their outcomes.
    pub async fn submit(&mut self, state: &SessionState, submission: Submission) -> SessionState {
        let mut requested = Vec::new();
        if submission.estimate {
            requested.push(SessionEvent::PredictionRequested);
        }
        if submission.tip {
            requested.push(SessionEvent::TipRequested);
        }
        let pending = replay(state, requested);

        let form = &pending.form;
        let estimator = &mut self.estimator;
        let client = self.client.as_ref();

        let prediction = async move {
            submission
                .estimate
                .then(|| prediction_event(estimator, form))
        };
        let tip = async move {
            if submission.tip {
                Some(tip_event(client, form).await)
            } else {
                None
            }
        };

        let (prediction, tip) = tokio::join!(prediction, tip);
        replay(&pending, prediction.into_iter().chain(tip))
    }
}

fn estimate_form<V: VariationSource>(
    estimator: &mut PriceEstimator<V>,
    form: &FormInput,
) -> Result<PriceEstimate> {
    let vehicle = form.parse()?;
    Ok(estimator.estimate(&vehicle.to_attributes()))
}

async fn tip_for_form<C: AdvisoryClient>(client: Option<&C>, form: &FormInput) -> Result<String> {
    let client = client.ok_or_else(|| AdvisorError::MissingConfigError {
        field: "advisory.api_key".to_string(),
    })?;
    let prompt = build_tip_prompt(form);
    tracing::debug!("Requesting AI tip ({} prompt chars)", prompt.chars().count());
    client.generate(&prompt).await
}

fn prediction_event<V: VariationSource>(
    estimator: &mut PriceEstimator<V>,
    form: &FormInput,
) -> SessionEvent {
    match estimate_form(estimator, form) {
        Ok(estimate) => {
            tracing::info!("Predicted price: {}", estimate.formatted_price());
            SessionEvent::PredictionSucceeded {
                price: estimate.price,
            }
        }
        Err(e) => SessionEvent::PredictionFailed {
            cause: e.to_string(),
        },
    }
}

async fn tip_event<C: AdvisoryClient>(client: Option<&C>, form: &FormInput) -> SessionEvent {
    match tip_for_form(client, form).await {
        Ok(tip) => {
            tracing::info!("Received AI tip ({} chars)", tip.chars().count());
            SessionEvent::TipSucceeded { tip }
        }
        Err(e) => SessionEvent::TipFailed {
            cause: e.to_string(),
        },
    }
}
