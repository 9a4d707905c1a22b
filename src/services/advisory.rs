use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::{Latency, LatencyConfig};
use crate::domains::crops::{self, CropRecommendation, GrowingConditions};
use crate::domains::diagnosis::{self, DiagnosisResult, ImageUpload};
use crate::error::Result;
use crate::interfaces::advisory::AdvisoryEngine;
use crate::interfaces::random::RandomSource;

pub const DISEASE_ADVICE: &str = "To identify crop diseases, look for visual symptoms like spots, wilting, or discoloration. Take clear photos of affected areas and upload them in the Disease Detection section for AI analysis. For common pests, consider natural remedies like neem oil or introducing beneficial insects before resorting to chemical pesticides.";

pub const IRRIGATION_ADVICE: &str = "Efficient irrigation is crucial for crop health. Consider drip irrigation to reduce water usage by up to 60%. Water early morning or evening to minimize evaporation. For most crops, it's better to water deeply but less frequently to encourage deeper root growth. Monitor soil moisture regularly and adjust based on weather conditions and crop stage.";

pub const FERTILIZER_ADVICE: &str = "Before applying fertilizers, conduct a soil test to understand your soil's specific needs. Organic options like compost, manure, and green manures improve soil structure while adding nutrients. Apply fertilizers at the right growth stage - nitrogen during vegetative growth, phosphorus for root development, and potassium during flowering and fruiting stages.";

pub const DEFAULT_ADVICE: &str = "Thank you for your question. To provide the most accurate advice, I'd need more specific details about your farming situation, such as your location, crop type, soil conditions, and current farming practices. Feel free to provide more context, or you can also use our Crop Recommendation tool for personalized suggestions based on your specific conditions.";

/// One keyword rule: any keyword found in the lower-cased query selects it.
#[derive(Debug, Clone, Copy)]
pub struct AdviceRule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

/// Evaluated in order; the first match wins.
pub static ADVICE_RULES: [AdviceRule; 3] = [
    AdviceRule {
        topic: "disease",
        keywords: &["disease", "pest"],
        response: DISEASE_ADVICE,
    },
    AdviceRule {
        topic: "irrigation",
        keywords: &["water", "irrigation"],
        response: IRRIGATION_ADVICE,
    },
    AdviceRule {
        topic: "fertilizer",
        keywords: &["fertilizer", "nutrient"],
        response: FERTILIZER_ADVICE,
    },
];

pub fn match_rule(query: &str) -> Option<&'static AdviceRule> {
    let lower = query.to_lowercase();
    ADVICE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lower.contains(kw)))
}

/// Canned advisory text for `query`, without any delay.
pub fn advise(query: &str) -> &'static str {
    match_rule(query).map_or(DEFAULT_ADVICE, |rule| rule.response)
}

/// Rule-based stand-in for the inference backend.
pub struct MockAdvisoryEngine {
    random: Arc<dyn RandomSource>,
    chat_latency: Latency,
    analysis_latency: Latency,
    recommendation_latency: Latency,
}

impl MockAdvisoryEngine {
    pub fn new(random: Arc<dyn RandomSource>, latency: &LatencyConfig) -> Self {
        Self {
            random,
            chat_latency: latency.chat(),
            analysis_latency: latency.analysis(),
            recommendation_latency: latency.recommendation(),
        }
    }

    pub fn without_latency(random: Arc<dyn RandomSource>) -> Self {
        Self::new(random, &LatencyConfig::zero())
    }
}

#[async_trait]
impl AdvisoryEngine for MockAdvisoryEngine {
    async fn respond_to_query(&self, query: &str) -> Result<String> {
        self.chat_latency.wait(self.random.as_ref()).await;
        let rule = match_rule(query);
        debug!(
            topic = rule.map_or("default", |rule| rule.topic),
            "advisory rule matched"
        );
        Ok(rule.map_or(DEFAULT_ADVICE, |rule| rule.response).to_string())
    }

    async fn classify_image(&self, image: &ImageUpload) -> Result<DiagnosisResult> {
        self.analysis_latency.wait(self.random.as_ref()).await;
        let index = self.random.index(diagnosis::catalog_len());
        let result = diagnosis::catalog_entry(index);
        info!(
            file = %image.file_name,
            disease = %result.disease,
            confidence = result.confidence,
            "image classified"
        );
        Ok(result)
    }

    async fn recommend_crops(
        &self,
        conditions: &GrowingConditions,
    ) -> Result<Vec<CropRecommendation>> {
        self.recommendation_latency.wait(self.random.as_ref()).await;
        debug!(soil = ?conditions.soil_type, "crop recommendations generated");
        Ok(crops::recommended_crops())
    }
}
