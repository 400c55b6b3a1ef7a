//! Integration tests for personalized content selection.

use std::collections::HashMap;

use polymotiv::{
    confidence_message, select_motivations, select_study_tips, Catalog, ClusterGreeting, Config,
    ConfidenceLevel, CourseCluster, LearningStyle, Motivation, MotivationCategory, Motivator,
    OnboardingForm, Preferences, StudyTip, Timestamp,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn preferences(cluster: CourseCluster, style: LearningStyle) -> Preferences {
    Preferences {
        course_cluster: cluster,
        learning_style: style,
        confidence_level: ConfidenceLevel::default(),
        timestamp: Timestamp::from_millis(0),
    }
}

// ============================================================================
// Selection Pool Tests
// ============================================================================

#[test]
fn test_tips_never_leave_the_style_pool() {
    let catalog = Catalog::builtin();

    for style in LearningStyle::ALL {
        let prefs = preferences(CourseCluster::Engineering, style);
        let pool = catalog.study_tips(style);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            for tip in select_study_tips(&catalog, Some(&prefs), 1, &mut rng) {
                assert!(pool.contains(&tip), "tip outside {style:?} pool");
            }
        }
    }
}

#[test]
fn test_motivations_come_from_general_union_cluster() {
    let catalog = Catalog::builtin();
    let prefs = preferences(CourseCluster::Health, LearningStyle::Visual);
    let mut rng = StdRng::seed_from_u64(2);

    let general = catalog.motivations(MotivationCategory::General);
    let health = catalog.motivations(MotivationCategory::Cluster(CourseCluster::Health));

    for item in select_motivations(&catalog, Some(&prefs), 5, &mut rng) {
        assert!(general.contains(&item) || health.contains(&item));
    }
}

#[test]
fn test_count_exceeding_pool_returns_full_pool() {
    let catalog = Catalog::builtin();
    let prefs = preferences(CourseCluster::Design, LearningStyle::Social);
    let mut rng = StdRng::seed_from_u64(3);

    // Builtin: 3 general + 2 design
    let drawn = select_motivations(&catalog, Some(&prefs), 1000, &mut rng);
    assert_eq!(drawn.len(), 5);
}

#[test]
fn test_custom_catalog_missing_cluster_selects_general_only() {
    let catalog = Catalog::custom(
        vec![
            Motivation::new("general one", "ctx"),
            Motivation::new("general two", "ctx"),
        ],
        HashMap::new(), // no cluster categories at all
        HashMap::from([(
            LearningStyle::Structured,
            vec![StudyTip::new("tip", "desc")],
        )]),
        HashMap::from([(
            CourseCluster::Engineering,
            ClusterGreeting::new("hi", "msg"),
        )]),
    )
    .unwrap();

    let prefs = preferences(CourseCluster::Health, LearningStyle::Structured);
    let mut rng = StdRng::seed_from_u64(4);

    let drawn = select_motivations(&catalog, Some(&prefs), 10, &mut rng);
    assert_eq!(drawn.len(), 2);
    for item in &drawn {
        assert!(item.quote.starts_with("general"));
    }
}

#[test]
fn test_custom_catalog_missing_style_falls_back_to_structured() {
    let catalog = Catalog::custom(
        vec![Motivation::new("q", "c")],
        HashMap::new(),
        HashMap::from([(
            LearningStyle::Structured,
            vec![StudyTip::new("structured tip", "desc")],
        )]),
        HashMap::from([(
            CourseCluster::Engineering,
            ClusterGreeting::new("hi", "msg"),
        )]),
    )
    .unwrap();

    let prefs = preferences(CourseCluster::Engineering, LearningStyle::Visual);
    let mut rng = StdRng::seed_from_u64(5);

    let drawn = select_study_tips(&catalog, Some(&prefs), 1, &mut rng);
    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].title, "structured tip");
}

// ============================================================================
// Confidence Message Tests
// ============================================================================

#[test]
fn test_confidence_levels_have_distinct_messages() {
    let messages: Vec<_> = (1..=5).map(confidence_message).collect();
    for (i, a) in messages.iter().enumerate() {
        for b in &messages[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_out_of_range_confidence_falls_back_to_level_three() {
    let level3 = confidence_message(3);
    assert_eq!(confidence_message(0), level3);
    assert_eq!(confidence_message(6), level3);
    assert_eq!(confidence_message(i64::MIN), level3);
    assert_eq!(confidence_message(i64::MAX), level3);
}

// ============================================================================
// Facade Tests
// ============================================================================

#[test]
fn test_refresh_draws_match_submitted_preferences() {
    let dir = tempdir().unwrap();
    let app = Motivator::open(dir.path().join("motiv.db"), Config::default()).unwrap();

    app.submit_onboarding(&OnboardingForm::filled("design", "hands-on", "4"))
        .unwrap();

    let hands_on = app.catalog().study_tips(LearningStyle::HandsOn);
    for _ in 0..10 {
        let tip = app.refresh_study_tip().unwrap();
        assert!(hands_on.contains(&tip));
    }
}

#[test]
fn test_refreshes_are_recorded_as_events() {
    let dir = tempdir().unwrap();
    let app = Motivator::open(dir.path().join("motiv.db"), Config::default()).unwrap();

    app.refresh_motivation().unwrap();
    app.refresh_study_tip().unwrap();

    let names: Vec<_> = app.events().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["motivation_refreshed", "study_tip_refreshed"]);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// For all counts within the pool size, selection returns exactly
    /// `count` distinct items drawn from the pool.
    #[test]
    fn prop_selection_count_and_distinctness(count in 0usize..=5, seed in any::<u64>()) {
        let catalog = Catalog::builtin();
        let prefs = preferences(CourseCluster::Business, LearningStyle::Social);
        let mut rng = StdRng::seed_from_u64(seed);

        // Pool: 3 general + 2 business = 5
        let drawn = select_motivations(&catalog, Some(&prefs), count, &mut rng);
        prop_assert_eq!(drawn.len(), count);

        for (i, a) in drawn.iter().enumerate() {
            for b in &drawn[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
    }

    /// Same seed, same draw.
    #[test]
    fn prop_seeded_draws_reproducible(seed in any::<u64>(), count in 0usize..=4) {
        let catalog = Catalog::builtin();
        let prefs = preferences(CourseCluster::Engineering, LearningStyle::Visual);

        let a = select_motivations(&catalog, Some(&prefs), count, &mut StdRng::seed_from_u64(seed));
        let b = select_motivations(&catalog, Some(&prefs), count, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }
}
