use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::domains::crops::{CropRecommendation, GrowingConditions, SoilType};
use crate::error::Result;
use crate::flows::fsm::{interaction_transition, InteractionAction, InteractionState};
use crate::flows::{IgnoreReason, Submission};
use crate::interfaces::advisory::AdvisoryEngine;

#[derive(Default)]
struct CropForm {
    state: InteractionState,
    conditions: GrowingConditions,
    recommendations: Vec<CropRecommendation>,
    generation: u64,
}

impl CropForm {
    fn apply(&mut self, action: InteractionAction) -> bool {
        match interaction_transition(self.state, action) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }
}

/// The crop recommendation form and its results tab.
pub struct CropFlow {
    engine: Arc<dyn AdvisoryEngine>,
    form: Mutex<CropForm>,
}

struct PendingRecommendation<'a> {
    form: &'a Mutex<CropForm>,
    generation: u64,
    settled: bool,
}

impl Drop for PendingRecommendation<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut form = lock(self.form);
        if form.generation == self.generation && form.state.is_pending() {
            // Results were cleared on submit, so the form is back to idle.
            form.apply(InteractionAction::Reset);
            debug!("pending crop recommendation abandoned");
        }
    }
}

fn lock(form: &Mutex<CropForm>) -> MutexGuard<'_, CropForm> {
    match form.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl CropFlow {
    pub fn new(engine: Arc<dyn AdvisoryEngine>) -> Self {
        Self {
            engine,
            form: Mutex::new(CropForm::default()),
        }
    }

    pub fn state(&self) -> InteractionState {
        lock(&self.form).state
    }

    pub fn is_busy(&self) -> bool {
        self.state().is_pending()
    }

    pub fn conditions(&self) -> GrowingConditions {
        lock(&self.form).conditions.clone()
    }

    pub fn recommendations(&self) -> Vec<CropRecommendation> {
        lock(&self.form).recommendations.clone()
    }

    /// Edits the form in place; sliders clamp through the setters.
    pub fn update(&self, edit: impl FnOnce(&mut GrowingConditions)) {
        edit(&mut lock(&self.form).conditions);
    }

    pub fn set_soil_type(&self, soil_type: SoilType) {
        self.update(|conditions| conditions.soil_type = Some(soil_type));
    }

    pub async fn submit(&self) -> Result<Submission> {
        let (conditions, generation) = {
            let mut form = lock(&self.form);
            if form.conditions.soil_type.is_none() {
                return Ok(Submission::Ignored(IgnoreReason::MissingSoilType));
            }
            if !form.apply(InteractionAction::Submit) {
                return Ok(Submission::Ignored(IgnoreReason::Busy));
            }
            form.recommendations.clear();
            (form.conditions.clone(), form.generation)
        };
        let mut pending = PendingRecommendation {
            form: &self.form,
            generation,
            settled: false,
        };

        let recommendations = match self.engine.recommend_crops(&conditions).await {
            Ok(recommendations) => recommendations,
            Err(err) => {
                warn!("crop recommendation failed: {err}");
                return Err(err);
            }
        };

        let mut form = lock(&self.form);
        pending.settled = true;
        if form.generation != generation {
            return Ok(Submission::Ignored(IgnoreReason::Discarded));
        }
        debug!(count = recommendations.len(), "crop recommendations ready");
        form.recommendations = recommendations;
        form.apply(InteractionAction::Resolve);
        Ok(Submission::Accepted)
    }

    /// Restores the form defaults and clears results.
    pub fn reset(&self) {
        let mut form = lock(&self.form);
        let generation = form.generation + 1;
        *form = CropForm {
            generation,
            ..CropForm::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::random::SequenceRandom;
    use crate::services::advisory::MockAdvisoryEngine;

    fn flow() -> CropFlow {
        let engine = MockAdvisoryEngine::without_latency(Arc::new(SequenceRandom::new(vec![0])));
        CropFlow::new(Arc::new(engine))
    }

    #[tokio::test]
    async fn soil_type_is_required() {
        let flow = flow();
        assert_eq!(
            flow.submit().await.unwrap(),
            Submission::Ignored(IgnoreReason::MissingSoilType)
        );
        assert!(flow.recommendations().is_empty());
    }

    #[tokio::test]
    async fn recommendations_ignore_sliders() {
        let flow = flow();
        flow.set_soil_type(SoilType::Sandy);
        flow.submit().await.unwrap();
        let first = flow.recommendations();

        flow.update(|conditions| {
            conditions.set_rainfall(300);
            conditions.set_temperature(5);
        });
        flow.submit().await.unwrap();
        assert_eq!(flow.recommendations(), first);
        assert_eq!(first.len(), 3);
        assert_eq!(flow.state(), InteractionState::Resolved);
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let flow = flow();
        flow.set_soil_type(SoilType::Clay);
        flow.update(|conditions| conditions.set_humidity(20));
        flow.submit().await.unwrap();

        flow.reset();
        assert_eq!(flow.conditions(), GrowingConditions::default());
        assert!(flow.recommendations().is_empty());
        assert_eq!(flow.state(), InteractionState::Idle);
    }
}
