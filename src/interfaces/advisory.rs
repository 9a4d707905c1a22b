use async_trait::async_trait;

use crate::domains::crops::{CropRecommendation, GrowingConditions};
use crate::domains::diagnosis::{DiagnosisResult, ImageUpload};
use crate::error::Result;

/// Stand-in for a remote inference service. Every call resolves after a
/// simulated delay; callers cancel by dropping the future.
#[async_trait]
pub trait AdvisoryEngine: Send + Sync {
    async fn respond_to_query(&self, query: &str) -> Result<String>;

    async fn classify_image(&self, image: &ImageUpload) -> Result<DiagnosisResult>;

    async fn recommend_crops(
        &self,
        conditions: &GrowingConditions,
    ) -> Result<Vec<CropRecommendation>>;
}
