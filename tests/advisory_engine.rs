use std::sync::Arc;
use std::time::{Duration, Instant};

use kisan_ai::config::LatencyConfig;
use kisan_ai::domains::crops::{recommended_crops, GrowingConditions, SoilType};
use kisan_ai::domains::diagnosis::{catalog, ImageUpload};
use kisan_ai::interfaces::advisory::AdvisoryEngine;
use kisan_ai::providers::random::{SequenceRandom, SystemRandom};
use kisan_ai::services::advisory::{
    MockAdvisoryEngine, DEFAULT_ADVICE, DISEASE_ADVICE, FERTILIZER_ADVICE, IRRIGATION_ADVICE,
};

fn leaf() -> ImageUpload {
    ImageUpload::new("leaf.jpg", "image/jpeg", vec![0xff, 0xd8]).expect("image upload")
}

#[tokio::test]
async fn keyword_rules_select_fixed_responses() {
    let engine = MockAdvisoryEngine::without_latency(Arc::new(SystemRandom));
    let cases = [
        ("My wheat has a disease", DISEASE_ADVICE),
        ("PEST control?", DISEASE_ADVICE),
        ("when to water paddy", IRRIGATION_ADVICE),
        ("drip irrigation cost", IRRIGATION_ADVICE),
        ("best fertilizer for maize", FERTILIZER_ADVICE),
        ("soil nutrient levels", FERTILIZER_ADVICE),
        ("what about the market price", DEFAULT_ADVICE),
        ("", DEFAULT_ADVICE),
    ];
    for (query, expected) in cases {
        assert_eq!(engine.respond_to_query(query).await.unwrap(), expected, "{query}");
    }
}

#[tokio::test]
async fn disease_rule_outranks_irrigation() {
    let engine = MockAdvisoryEngine::without_latency(Arc::new(SystemRandom));
    let reply = engine
        .respond_to_query("irrigation spreads the disease?")
        .await
        .unwrap();
    assert_eq!(reply, DISEASE_ADVICE);
}

#[tokio::test]
async fn classification_returns_catalog_literals() {
    let engine = MockAdvisoryEngine::without_latency(Arc::new(SequenceRandom::new(vec![0, 1, 2])));
    let known = catalog();
    for expected in &known {
        let result = engine.classify_image(&leaf()).await.unwrap();
        assert_eq!(&result, expected);
        assert_eq!(result.confidence, expected.confidence);
    }
}

#[tokio::test]
async fn random_classification_stays_in_catalog() {
    let engine = MockAdvisoryEngine::without_latency(Arc::new(SystemRandom));
    let known = catalog();
    for _ in 0..20 {
        let result = engine.classify_image(&leaf()).await.unwrap();
        assert!(known.contains(&result));
    }
}

#[tokio::test]
async fn recommendations_are_the_fixed_list() {
    let engine = MockAdvisoryEngine::without_latency(Arc::new(SystemRandom));
    let mut conditions = GrowingConditions::default();
    conditions.soil_type = Some(SoilType::Peaty);
    conditions.set_rainfall(0);
    assert_eq!(
        engine.recommend_crops(&conditions).await.unwrap(),
        recommended_crops()
    );
}

#[tokio::test]
async fn responses_wait_for_configured_latency() {
    let latency = LatencyConfig {
        chat_ms: 60,
        ..LatencyConfig::zero()
    };
    let engine = MockAdvisoryEngine::new(Arc::new(SystemRandom), &latency);
    let started = Instant::now();
    engine.respond_to_query("water").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn dropping_the_future_abandons_the_call() {
    let latency = LatencyConfig {
        analysis_ms: 5_000,
        ..LatencyConfig::zero()
    };
    let engine = MockAdvisoryEngine::new(Arc::new(SystemRandom), &latency);
    let image = leaf();
    let outcome =
        tokio::time::timeout(Duration::from_millis(20), engine.classify_image(&image)).await;
    assert!(outcome.is_err());
}
