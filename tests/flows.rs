use std::sync::Arc;
use std::time::Duration;

use kisan_ai::config::LatencyConfig;
use kisan_ai::domains::chat::Role;
use kisan_ai::domains::crops::{GrowingConditions, SoilType};
use kisan_ai::domains::diagnosis::{catalog_entry, ImageUpload};
use kisan_ai::flows::chat::ChatFlow;
use kisan_ai::flows::crops::CropFlow;
use kisan_ai::flows::detection::DetectionFlow;
use kisan_ai::flows::fsm::{DetectionState, InteractionState};
use kisan_ai::flows::{IgnoreReason, Submission};
use kisan_ai::interfaces::advisory::AdvisoryEngine;
use kisan_ai::providers::random::SequenceRandom;
use kisan_ai::services::advisory::{MockAdvisoryEngine, IRRIGATION_ADVICE};

fn slow_engine(draws: Vec<usize>) -> Arc<dyn AdvisoryEngine> {
    let latency = LatencyConfig {
        chat_ms: 150,
        analysis_ms: 150,
        recommendation_ms: 150,
        ..LatencyConfig::zero()
    };
    Arc::new(MockAdvisoryEngine::new(
        Arc::new(SequenceRandom::new(draws)),
        &latency,
    ))
}

fn photo() -> ImageUpload {
    ImageUpload::new("field.png", "image/png", vec![137, 80, 78, 71]).expect("image upload")
}

#[tokio::test]
async fn chat_rejects_second_question_while_pending() {
    let chat = Arc::new(ChatFlow::new(slow_engine(vec![0])));

    let first = {
        let chat = chat.clone();
        tokio::spawn(async move { chat.submit("how much water for rice?").await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(chat.is_busy());

    let second = chat.submit("and fertilizer?").await.unwrap();
    assert_eq!(second, Submission::Ignored(IgnoreReason::Busy));

    assert_eq!(first.await.unwrap().unwrap(), Submission::Accepted);
    let messages = chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].content, "how much water for rice?");
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[2].content, IRRIGATION_ADVICE);
    assert_ne!(messages[1].id, messages[2].id);

    // Resolved accepts the next question.
    assert!(chat.submit("pests?").await.unwrap().is_accepted());
    assert_eq!(chat.messages().len(), 5);
}

#[tokio::test]
async fn abandoned_chat_query_frees_the_flow() {
    let chat = ChatFlow::new(slow_engine(vec![0]));
    let outcome = tokio::time::timeout(Duration::from_millis(20), chat.submit("water")).await;
    assert!(outcome.is_err());
    assert_eq!(chat.state(), InteractionState::Idle);
    assert!(!chat.is_busy());
}

#[tokio::test]
async fn detection_reset_discards_late_result() {
    let detection = Arc::new(DetectionFlow::new(slow_engine(vec![1])));
    detection.select_image(Some(photo()));

    let pending = {
        let detection = detection.clone();
        tokio::spawn(async move { detection.analyze().await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(detection.state(), DetectionState::Analyzing);
    assert_eq!(
        detection.analyze().await.unwrap(),
        Submission::Ignored(IgnoreReason::Busy)
    );

    detection.reset();
    assert_eq!(
        pending.await.unwrap().unwrap(),
        Submission::Ignored(IgnoreReason::Discarded)
    );
    assert_eq!(detection.state(), DetectionState::Idle);
    assert!(detection.image().is_none());
    assert!(detection.result().is_none());
}

#[tokio::test]
async fn detection_shows_exactly_one_result() {
    let detection = DetectionFlow::new(slow_engine(vec![1]));
    assert!(detection.select_image(Some(photo())).is_accepted());
    assert!(detection.preview().unwrap().starts_with("data:image/png;base64,"));

    detection.analyze().await.unwrap();
    let result = detection.result().expect("diagnosis");
    assert_eq!(result, catalog_entry(1));
    assert_eq!(result.disease, "Powdery Mildew");
    assert_eq!(result.confidence, 88.7);
}

#[tokio::test]
async fn abandoned_analysis_keeps_the_image() {
    let detection = DetectionFlow::new(slow_engine(vec![0]));
    detection.select_image(Some(photo()));
    let outcome = tokio::time::timeout(Duration::from_millis(20), detection.analyze()).await;
    assert!(outcome.is_err());
    assert_eq!(detection.state(), DetectionState::ImageSelected);
    assert!(detection.image().is_some());
}

#[tokio::test]
async fn crop_reset_during_generation_returns_to_defaults() {
    let crops = Arc::new(CropFlow::new(slow_engine(vec![0])));
    crops.set_soil_type(SoilType::Silty);
    crops.update(|conditions| conditions.set_rainfall(120));

    let pending = {
        let crops = crops.clone();
        tokio::spawn(async move { crops.submit().await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(crops.is_busy());
    assert_eq!(
        crops.submit().await.unwrap(),
        Submission::Ignored(IgnoreReason::Busy)
    );

    crops.reset();
    assert_eq!(
        pending.await.unwrap().unwrap(),
        Submission::Ignored(IgnoreReason::Discarded)
    );
    assert_eq!(crops.conditions(), GrowingConditions::default());
    assert!(crops.recommendations().is_empty());
    assert_eq!(crops.state(), InteractionState::Idle);
}
