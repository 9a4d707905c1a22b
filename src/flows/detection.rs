use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::domains::diagnosis::{DiagnosisResult, ImageUpload};
use crate::error::Result;
use crate::flows::fsm::{detection_transition, DetectionAction, DetectionState};
use crate::flows::{IgnoreReason, Submission};
use crate::interfaces::advisory::AdvisoryEngine;

struct Detection {
    state: DetectionState,
    image: Option<ImageUpload>,
    result: Option<DiagnosisResult>,
    generation: u64,
}

impl Detection {
    fn new() -> Self {
        Self {
            state: DetectionState::Idle,
            image: None,
            result: None,
            generation: 0,
        }
    }

    fn apply(&mut self, action: DetectionAction) -> bool {
        match detection_transition(self.state, action) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }
}

/// Upload, analyse, show one diagnosis, start over.
pub struct DetectionFlow {
    engine: Arc<dyn AdvisoryEngine>,
    detection: Mutex<Detection>,
}

struct PendingAnalysis<'a> {
    detection: &'a Mutex<Detection>,
    generation: u64,
    settled: bool,
}

impl Drop for PendingAnalysis<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut detection = lock(self.detection);
        if detection.generation == self.generation && detection.apply(DetectionAction::Abandon) {
            debug!("pending image analysis abandoned");
        }
    }
}

fn lock(detection: &Mutex<Detection>) -> MutexGuard<'_, Detection> {
    match detection.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl DetectionFlow {
    pub fn new(engine: Arc<dyn AdvisoryEngine>) -> Self {
        Self {
            engine,
            detection: Mutex::new(Detection::new()),
        }
    }

    pub fn state(&self) -> DetectionState {
        lock(&self.detection).state
    }

    pub fn is_busy(&self) -> bool {
        self.state() == DetectionState::Analyzing
    }

    pub fn image(&self) -> Option<ImageUpload> {
        lock(&self.detection).image.clone()
    }

    /// `data:` URL for previewing the selected image.
    pub fn preview(&self) -> Option<String> {
        lock(&self.detection).image.as_ref().map(ImageUpload::data_url)
    }

    pub fn result(&self) -> Option<DiagnosisResult> {
        lock(&self.detection).result.clone()
    }

    /// Replaces the selected image and drops any previous result. An empty
    /// selection is a no-op.
    pub fn select_image(&self, image: Option<ImageUpload>) -> Submission {
        let Some(image) = image else {
            return Submission::Ignored(IgnoreReason::NoImage);
        };
        let mut detection = lock(&self.detection);
        if !detection.apply(DetectionAction::SelectImage) {
            return Submission::Ignored(IgnoreReason::Busy);
        }
        debug!(file = %image.file_name, bytes = image.len(), "image selected");
        detection.image = Some(image);
        detection.result = None;
        Submission::Accepted
    }

    pub async fn analyze(&self) -> Result<Submission> {
        let (image, generation) = {
            let mut detection = lock(&self.detection);
            let Some(image) = detection.image.clone() else {
                return Ok(Submission::Ignored(IgnoreReason::NoImage));
            };
            if !detection.apply(DetectionAction::Analyze) {
                return Ok(Submission::Ignored(IgnoreReason::Busy));
            }
            detection.result = None;
            (image, detection.generation)
        };
        let mut pending = PendingAnalysis {
            detection: &self.detection,
            generation,
            settled: false,
        };

        let result = match self.engine.classify_image(&image).await {
            Ok(result) => result,
            Err(err) => {
                warn!(file = %image.file_name, "image analysis failed: {err}");
                return Err(err);
            }
        };

        let mut detection = lock(&self.detection);
        pending.settled = true;
        if detection.generation != generation {
            info!(disease = %result.disease, "discarding analysis for a reset flow");
            return Ok(Submission::Ignored(IgnoreReason::Discarded));
        }
        detection.result = Some(result);
        detection.apply(DetectionAction::Resolve);
        Ok(Submission::Accepted)
    }

    /// Clears the image and result; an analysis still running is discarded.
    pub fn reset(&self) {
        let mut detection = lock(&self.detection);
        let generation = detection.generation + 1;
        *detection = Detection::new();
        detection.generation = generation;
    }
}
