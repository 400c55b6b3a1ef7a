//! Personalized content selection.
//!
//! Selection draws uniformly without replacement via shuffle-then-take: the
//! candidate pool is shuffled and the first `count` items are returned. If
//! `count` exceeds the pool size the full pool comes back — no error, no
//! padding.
//!
//! Both entry points are generic over [`rand::Rng`] so a test harness can
//! inject a seeded `StdRng` and make draws reproducible; production callers
//! pass `rand::rng()`.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::{Catalog, Motivation, MotivationCategory, StudyTip};
use crate::preferences::{LearningStyle, Preferences};

/// Draws `count` motivations for the given preferences.
///
/// The pool is the union of the general category and the category matching
/// the student's course cluster (absent cluster categories contribute
/// nothing). Without preferences the default cluster applies.
pub fn select_motivations<R: Rng + ?Sized>(
    catalog: &Catalog,
    preferences: Option<&Preferences>,
    count: usize,
    rng: &mut R,
) -> Vec<Motivation> {
    let cluster = preferences.map(|p| p.course_cluster).unwrap_or_default();

    let mut pool: Vec<&Motivation> = catalog
        .motivations(MotivationCategory::General)
        .iter()
        .chain(catalog.motivations(MotivationCategory::Cluster(cluster)).iter())
        .collect();

    draw(&mut pool, count, rng)
}

/// Draws `count` study tips for the given preferences.
///
/// The pool is solely the category matching the student's learning style;
/// an unset style, or a style table absent from the catalog, falls back to
/// the structured table.
pub fn select_study_tips<R: Rng + ?Sized>(
    catalog: &Catalog,
    preferences: Option<&Preferences>,
    count: usize,
    rng: &mut R,
) -> Vec<StudyTip> {
    let style = preferences.map(|p| p.learning_style).unwrap_or_default();

    let mut tips = catalog.study_tips(style);
    if tips.is_empty() {
        tips = catalog.study_tips(LearningStyle::Structured);
    }

    let mut pool: Vec<&StudyTip> = tips.iter().collect();
    draw(&mut pool, count, rng)
}

/// Shuffles the pool and clones out the first `count` items.
fn draw<T: Clone, R: Rng + ?Sized>(pool: &mut Vec<&T>, count: usize, rng: &mut R) -> Vec<T> {
    pool.shuffle(rng);
    pool.iter().take(count).map(|item| (*item).clone()).collect()
}
