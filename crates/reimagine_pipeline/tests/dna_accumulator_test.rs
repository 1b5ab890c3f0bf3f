//! Rolling merge and consolidation behavior.

mod test_utils;

use reimagine_core::{Character, FinalDna, StoryDna};
use reimagine_pipeline::{DnaAccumulator, Outcome, RetryPolicy};
use serde_json::json;
use test_utils::{MockResponse, MockStoryDriver, Stage, mars_response};

fn seed() -> StoryDna {
    StoryDna {
        characters: vec![Character::new("Elizabeth", "heroine", "quick-witted")],
        events: vec!["The Bennets hear of Netherfield's new tenant".into()],
        themes: vec!["pride".into()],
    }
}

fn summary(i: usize) -> StoryDna {
    StoryDna {
        characters: vec![Character::new(format!("Visitor {i}"), "guest", "curious")],
        events: vec![format!("Event in chunk {i}")],
        themes: vec!["society".into()],
    }
}

/// Merges by appending the new summary's entries, with no caps of its own.
fn appending_merge(_stage: Stage, user: &str) -> MockResponse {
    let current_start = user.find('{').unwrap();
    let current_end = user.find("\n\nSummary of the newest excerpt:").unwrap();
    let new_start = current_end + user[current_end..].find('{').unwrap();
    let new_end = user.rfind("\n\nReturn the updated").unwrap();

    let mut current: serde_json::Value =
        serde_json::from_str(&user[current_start..current_end]).unwrap();
    let new: serde_json::Value = serde_json::from_str(&user[new_start..new_end]).unwrap();

    for key in ["characters", "events", "themes"] {
        let extra = new[key].as_array().unwrap().clone();
        current[key].as_array_mut().unwrap().extend(extra);
    }
    MockResponse::json(current)
}

#[tokio::test]
async fn test_merge_with_empty_summary_returns_seed() {
    let driver = MockStoryDriver::always_failing();
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let outcome = accumulator.merge(seed(), &StoryDna::default()).await;

    assert_eq!(outcome, Outcome::Accepted(seed()));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_failed_merge_returns_current_unchanged() {
    let driver = MockStoryDriver::always_failing();
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let (dna, degradation) = accumulator.merge(seed(), &summary(1)).await.into_parts();

    assert_eq!(dna, seed());
    assert!(degradation.is_some());
    assert_eq!(driver.call_count(), 3);
}

#[tokio::test]
async fn test_caps_hold_after_many_merges() {
    let driver = MockStoryDriver::new(appending_merge);
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let mut summaries = vec![seed()];
    summaries.extend((1..=30).map(summary));
    let (dna, degradations) = accumulator.fold(&summaries).await;

    assert!(degradations.is_empty());
    assert_eq!(driver.prompts_for(Stage::Merge).len(), 30);
    assert_eq!(dna.characters.len(), StoryDna::MAX_CHARACTERS);
    assert_eq!(dna.events.len(), StoryDna::MAX_EVENTS);
    assert_eq!(dna.events.first(), seed().events.first());
    assert_eq!(dna.events.last().map(String::as_str), Some("Event in chunk 30"));
    assert_eq!(dna.themes, vec!["pride".to_string(), "society".to_string()]);
}

#[tokio::test]
async fn test_oversized_seed_is_capped() {
    let driver = MockStoryDriver::always_failing();
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let oversized = StoryDna {
        characters: (0..12)
            .map(|i| Character::new(format!("c{i}"), "r", "t"))
            .collect(),
        events: (0..20).map(|i| format!("e{i}")).collect(),
        themes: vec!["t".into()],
    };
    let (dna, degradations) = accumulator.fold(&[oversized]).await;

    assert!(degradations.is_empty());
    assert_eq!(driver.call_count(), 0);
    assert_eq!(dna.characters.len(), 10);
    assert_eq!(dna.events.len(), 15);
}

#[tokio::test]
async fn test_fold_of_nothing_is_empty() {
    let driver = MockStoryDriver::always_failing();
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let (dna, _) = accumulator.fold(&[]).await;
    assert!(dna.is_empty());
}

#[tokio::test]
async fn test_merge_order_matters() {
    let driver = MockStoryDriver::new(appending_merge);
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let (forward, _) = accumulator.fold(&[seed(), summary(1), summary(2)]).await;
    let (backward, _) = accumulator.fold(&[seed(), summary(2), summary(1)]).await;

    assert_ne!(forward.events, backward.events);
}

#[tokio::test]
async fn test_local_summary_rejects_partial_output() {
    let driver = MockStoryDriver::new(|_, _| {
        MockResponse::json(json!({"characters": [{"name": "Jo"}], "events": ["a fire"], "themes": []}))
    });
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let outcome = accumulator
        .summarize_chunk(&["Jo watched the barn burn.".to_string()])
        .await;

    assert!(outcome.is_degraded());
    assert_eq!(outcome.value(), &StoryDna::placeholder());
}

#[tokio::test]
async fn test_summaries_use_only_their_chunk() {
    let driver = MockStoryDriver::new(mars_response);
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let chunks = vec![
        vec!["First chunk text.".to_string()],
        vec!["Second chunk text.".to_string()],
    ];
    let (summaries, _) = accumulator.summarize_all(&chunks).await;

    assert_eq!(summaries.len(), 2);
    let prompts = driver.prompts_for(Stage::LocalSummary);
    assert!(prompts[0].contains("First chunk") && !prompts[0].contains("Second chunk"));
    assert!(prompts[1].contains("Second chunk") && !prompts[1].contains("First chunk"));
}

#[tokio::test]
async fn test_consolidation_fallback_is_blueprint_shaped() {
    let driver = MockStoryDriver::new(|_, _| MockResponse::json(json!({"characters": ["Ahab"]})));
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::new(2));

    let working = StoryDna {
        characters: vec![Character::new("Ahab", "captain", "obsessed")],
        events: (1..=10).map(|i| format!("event {i}")).collect(),
        themes: vec!["obsession".into(), "fate".into(), "nature".into(), "faith".into()],
    };
    let (blueprint, degradation) = accumulator.consolidate(&working).await.into_parts();

    assert_eq!(driver.call_count(), 2);
    assert!(degradation.unwrap().reason().contains("plot_arc"));
    assert_eq!(blueprint, FinalDna::from_accumulated(&working));
    assert_eq!(blueprint.critical_moments.len(), FinalDna::MAX_CRITICAL_MOMENTS);
    assert_eq!(blueprint.themes.len(), FinalDna::MAX_THEMES);
}

#[tokio::test]
async fn test_consolidation_rejects_blank_critical_moments() {
    let driver = MockStoryDriver::new(|_, _| {
        MockResponse::json(json!({
            "plot_arc": {"setup": "a", "conflict": "b", "climax": "c", "resolution": "d"},
            "characters": ["Ahab"],
            "themes": ["obsession"],
            "critical_moments": ["", "  ", null]
        }))
    });
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let working = StoryDna {
        characters: vec![Character::new("Ahab", "captain", "obsessed")],
        events: (1..=5).map(|i| format!("event {i}")).collect(),
        themes: vec!["obsession".into()],
    };
    let (blueprint, degradation) = accumulator.consolidate(&working).await.into_parts();

    assert!(degradation.unwrap().reason().contains("critical_moments"));
    assert_eq!(blueprint.critical_moments.len(), 5);
}

#[tokio::test]
async fn test_local_summary_rejects_blank_events() {
    let driver = MockStoryDriver::new(|_, _| {
        MockResponse::json(json!({"characters": ["Ahab"], "events": [""], "themes": ["fate"]}))
    });
    let accumulator = DnaAccumulator::new(&driver, RetryPolicy::default());

    let outcome = accumulator
        .summarize_chunk(&["Ahab paced the deck.".to_string()])
        .await;

    assert!(outcome.is_degraded());
    assert_eq!(outcome.value(), &StoryDna::placeholder());
}
