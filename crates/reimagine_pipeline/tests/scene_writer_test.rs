//! Scene generation, world mapping and final polish.

mod test_utils;

use reimagine_core::{FinalDna, Mappings, NewWorld, PlotArc, ScenePlanEntry, ScenePosition, TransformationMap};
use reimagine_pipeline::{RetryPolicy, SCENE_BREAK, SceneWriter, WorldMapper, create_scene_plan};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use test_utils::{MockResponse, MockStoryDriver, Stage};

fn blueprint() -> FinalDna {
    FinalDna {
        plot_arc: PlotArc {
            setup: "a quiet town".into(),
            conflict: "a stranger arrives".into(),
            climax: "the standoff".into(),
            resolution: "the stranger leaves".into(),
        },
        themes: vec!["belonging".into()],
        critical_moments: vec!["arrival".into(), "standoff".into()],
        ..FinalDna::default()
    }
}

fn transformation() -> TransformationMap {
    TransformationMap {
        new_world: NewWorld::from_brief("an orbital station"),
        mappings: Mappings::empty(),
    }
}

fn entry(position: ScenePosition, index: usize) -> ScenePlanEntry {
    ScenePlanEntry {
        position,
        source_moment: "the standoff".into(),
        index,
    }
}

#[tokio::test]
async fn test_scene_from_valid_json() {
    let driver = MockStoryDriver::new(|_, _| {
        MockResponse::json(json!({
            "scene_text": "Airlocks hissed as the stranger stepped aboard.",
            "scene_summary": "A stranger boards the station."
        }))
    });
    let writer = SceneWriter::new(&driver, RetryPolicy::default(), 400, 1500);

    let scene = writer
        .generate_scene(&blueprint(), &transformation(), &entry(ScenePosition::Opening, 0), None)
        .await;

    assert!(!scene.is_degraded());
    assert_eq!(scene.value().summary, "A stranger boards the station.");
    assert_eq!(scene.value().position, ScenePosition::Opening);
    assert!(driver.prompts_for(Stage::Scene)[0].contains("Target length: 400 words"));
}

#[tokio::test]
async fn test_missing_summary_gets_synthetic_one() {
    let driver = MockStoryDriver::new(|_, _| MockResponse::json(json!({"scene_text": "Sirens."})));
    let writer = SceneWriter::new(&driver, RetryPolicy::default(), 400, 1500);

    let scene = writer
        .generate_scene(&blueprint(), &transformation(), &entry(ScenePosition::Rising, 1), Some("prior"))
        .await;

    assert!(!scene.is_degraded());
    assert_eq!(scene.value().summary, "Scene rising completed");
}

#[tokio::test]
async fn test_malformed_output_uses_last_raw_text() {
    let calls = AtomicUsize::new(0);
    let driver = MockStoryDriver::new(move |_, _| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        MockResponse::text(format!("Draft number {n}, no JSON."))
    });
    let writer = SceneWriter::new(&driver, RetryPolicy::default(), 400, 1500);

    let (scene, degradation) = writer
        .generate_scene(&blueprint(), &transformation(), &entry(ScenePosition::Climax, 2), None)
        .await
        .into_parts();

    assert_eq!(scene.text, "Draft number 2, no JSON.");
    assert_eq!(scene.summary, "Scene climax completed");
    assert_eq!(degradation.unwrap().site(), "scene_2_climax");
}

#[tokio::test]
async fn test_raised_calls_give_placeholder() {
    let driver = MockStoryDriver::always_failing();
    let writer = SceneWriter::new(&driver, RetryPolicy::default(), 400, 1500);

    let scene = writer
        .generate_scene(&blueprint(), &transformation(), &entry(ScenePosition::Middle, 5), None)
        .await;

    assert_eq!(scene.value().text, "Scene middle could not be generated.");
    assert_eq!(scene.value().summary, "Scene middle failed");
    assert_eq!(driver.call_count(), 3);
}

#[tokio::test]
async fn test_polish_joins_scenes_with_breaks() {
    let driver = MockStoryDriver::new(|_, _| MockResponse::text("The finished story."));
    let writer = SceneWriter::new(&driver, RetryPolicy::default(), 400, 1800);

    let scenes = vec![
        reimagine_core::Scene {
            text: "First.".into(),
            summary: "s1".into(),
            position: ScenePosition::Opening,
        },
        reimagine_core::Scene {
            text: "Second.".into(),
            summary: "s2".into(),
            position: ScenePosition::Rising,
        },
    ];
    let story = writer.polish(&scenes, &blueprint()).await.unwrap();

    assert_eq!(story, "The finished story.");
    let prompt = &driver.prompts_for(Stage::Polish)[0];
    assert!(prompt.contains(&format!("First.{SCENE_BREAK}Second.")));
    assert!(prompt.contains("roughly 1800 words"));
    assert!(prompt.contains("a stranger arrives"));
}

#[tokio::test]
async fn test_polish_failure_is_fatal_after_one_call() {
    let driver = MockStoryDriver::always_failing();
    let writer = SceneWriter::new(&driver, RetryPolicy::new(5), 400, 1500);

    let err = writer.polish(&[], &blueprint()).await.unwrap_err();

    assert!(err.to_string().contains("Final polish failed"));
    assert_eq!(driver.call_count(), 1);
}

#[test]
fn test_plan_from_blueprint() {
    let plan = create_scene_plan(&blueprint().critical_moments, 4);
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].position, ScenePosition::Opening);
    assert_eq!(plan[1].position, ScenePosition::Rising);
    assert_eq!(plan[1].source_moment, "standoff");
}

#[tokio::test]
async fn test_world_requires_setting_then_accepts() {
    let calls = AtomicUsize::new(0);
    let driver = MockStoryDriver::new(move |_, _| {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            MockResponse::json(json!({"setting": "", "era": "far future"}))
        } else {
            MockResponse::json(json!({"setting": "Halo Ring Seven", "era": "far future"}))
        }
    });
    let mapper = WorldMapper::new(&driver, RetryPolicy::default());

    let world = mapper
        .define_world(&["belonging".to_string()], "Setting Type: Space Opera")
        .await;

    assert!(!world.is_degraded());
    assert_eq!(world.value().setting, "Halo Ring Seven");
    assert_eq!(driver.call_count(), 2);
}

#[tokio::test]
async fn test_world_falls_back_to_brief() {
    let driver = MockStoryDriver::always_failing();
    let mapper = WorldMapper::new(&driver, RetryPolicy::default());
    let brief = "Setting Type: Fantasy | Specific Setting: Sunken city | Time Period: Age of Tides | Tone: Epic";

    let world = mapper.define_world(&[], brief).await;

    assert!(world.is_degraded());
    assert_eq!(world.value(), &NewWorld::from_brief(brief));
}

#[tokio::test]
async fn test_mapping_keeps_world_and_accepts_list_shapes() {
    let driver = MockStoryDriver::new(|_, _| {
        MockResponse::json(json!({
            "character_mappings": [{"original": "Sheriff", "new": "Station warden"}],
            "conflict_mappings": [{"original": "land feud", "new": "oxygen quota dispute"}],
            "preserved_dynamics": []
        }))
    });
    let mapper = WorldMapper::new(&driver, RetryPolicy::default());
    let world = NewWorld::from_brief("an orbital station");

    let map = mapper.map_transformation(&blueprint(), world.clone()).await;

    assert!(!map.is_degraded());
    assert_eq!(map.value().new_world, world);
    assert!(map.value().mappings.is_complete());
}
