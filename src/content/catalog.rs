//! The content catalog: builtin tables and typed lookups.
//!
//! The catalog is read-only after construction. [`Catalog::builtin`] loads
//! the full production content set; [`Catalog::custom`] lets tests and
//! embedders supply their own tables, subject to the fallback invariants
//! (the general motivation pool and the structured tip pool must be
//! non-empty, and a greeting must exist for the default cluster).

use std::collections::HashMap;

use crate::error::{MotivError, ValidationError};
use crate::preferences::{ConfidenceLevel, CourseCluster, LearningStyle};

use super::types::{ClusterGreeting, Motivation, MotivationCategory, StudyTip};

/// Read-only content tables keyed by cluster and learning style.
#[derive(Clone, Debug)]
pub struct Catalog {
    general_motivations: Vec<Motivation>,
    cluster_motivations: HashMap<CourseCluster, Vec<Motivation>>,
    style_tips: HashMap<LearningStyle, Vec<StudyTip>>,
    greetings: HashMap<CourseCluster, ClusterGreeting>,
    /// The default cluster's greeting, held separately so lookups for
    /// greeting-less clusters stay total.
    default_greeting: ClusterGreeting,
}

impl Catalog {
    /// Builds a catalog from caller-supplied tables.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a fallback pool is missing:
    /// - `general_motivations` is empty
    /// - no non-empty tip table for [`LearningStyle::Structured`]
    /// - no greeting for [`CourseCluster::Engineering`]
    pub fn custom(
        general_motivations: Vec<Motivation>,
        cluster_motivations: HashMap<CourseCluster, Vec<Motivation>>,
        style_tips: HashMap<LearningStyle, Vec<StudyTip>>,
        greetings: HashMap<CourseCluster, ClusterGreeting>,
    ) -> Result<Self, MotivError> {
        if general_motivations.is_empty() {
            return Err(ValidationError::required_field("general motivations").into());
        }

        let structured_ok = style_tips
            .get(&LearningStyle::Structured)
            .is_some_and(|tips| !tips.is_empty());
        if !structured_ok {
            return Err(ValidationError::required_field("structured study tips").into());
        }

        let default_greeting = greetings
            .get(&CourseCluster::Engineering)
            .cloned()
            .ok_or_else(|| ValidationError::required_field("engineering greeting"))?;

        Ok(Self {
            general_motivations,
            cluster_motivations,
            style_tips,
            greetings,
            default_greeting,
        })
    }

    /// Returns the motivation items for a category.
    ///
    /// Absent cluster categories yield an empty slice; callers union with
    /// the general category rather than erroring.
    pub fn motivations(&self, category: MotivationCategory) -> &[Motivation] {
        match category {
            MotivationCategory::General => &self.general_motivations,
            MotivationCategory::Cluster(cluster) => self
                .cluster_motivations
                .get(&cluster)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    /// Returns the study tips for a learning style.
    ///
    /// Absent style tables yield an empty slice; selection falls back to
    /// the structured table.
    pub fn study_tips(&self, style: LearningStyle) -> &[StudyTip] {
        self.style_tips.get(&style).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the dashboard greeting for a cluster.
    ///
    /// Clusters without a greeting resolve to the default cluster's
    /// greeting, whose presence is guaranteed at construction.
    pub fn greeting(&self, cluster: CourseCluster) -> &ClusterGreeting {
        self.greetings.get(&cluster).unwrap_or(&self.default_greeting)
    }

    /// Returns the confidence message for a raw level.
    ///
    /// Exact lookup for 1–5; anything else (including non-integer input
    /// coerced by the caller) resolves to the level-3 message.
    pub fn confidence_message(&self, level: i64) -> &'static str {
        confidence_message(level)
    }

    /// Builds the full production catalog.
    pub fn builtin() -> Self {
        let general_motivations = vec![
            Motivation::new(
                "Every expert was once a beginner. You've got this! 🎯",
                "Remember: Your polytechnic journey is unique. Focus on your own progress, \
                 not comparing yourself to others.",
            ),
            Motivation::new(
                "Small progress is still progress. Keep moving forward! ⭐",
                "Even 15 minutes of study today is better than none. Consistency beats \
                 perfection every time.",
            ),
            Motivation::new(
                "Your future self will thank you for the effort you put in today! 💪",
                "Think about where you want to be in 2 years. Every study session gets you \
                 closer to that goal.",
            ),
        ];

        let mut cluster_motivations = HashMap::new();
        cluster_motivations.insert(
            CourseCluster::Engineering,
            vec![
                Motivation::new(
                    "Great engineers aren't born, they're built through curiosity and \
                     persistence! ⚙️",
                    "Every coding error and failed circuit is a learning opportunity. Embrace \
                     the problem-solving process!",
                ),
                Motivation::new(
                    "Innovation starts with imagination. Dream big, engineer bigger! 🚀",
                    "The technology you're learning today could change tomorrow's world. Your \
                     ideas matter!",
                ),
            ],
        );
        cluster_motivations.insert(
            CourseCluster::Business,
            vec![
                Motivation::new(
                    "Leaders aren't made overnight, but every day of learning counts! 💼",
                    "Business skills are like muscles - they grow stronger with practice. Start \
                     building your leadership mindset now!",
                ),
                Motivation::new(
                    "Your ideas have power. Business is about turning ideas into impact! 💡",
                    "Every successful entrepreneur started as a student. Your business journey \
                     begins with your education.",
                ),
            ],
        );
        cluster_motivations.insert(
            CourseCluster::Design,
            vec![
                Motivation::new(
                    "Creativity is intelligence having fun! Let your imagination soar! 🎨",
                    "Every design starts with a blank canvas. Your unique perspective is what \
                     makes your work special.",
                ),
                Motivation::new(
                    "Good design is good communication. Your art tells stories! 📱",
                    "Design isn't just about making things pretty - it's about solving problems \
                     and connecting with people.",
                ),
            ],
        );
        cluster_motivations.insert(
            CourseCluster::Health,
            vec![
                Motivation::new(
                    "Caring for others starts with caring for your own growth! 🏥",
                    "Healthcare heroes are made through dedication and compassion. Every lesson \
                     brings you closer to helping others.",
                ),
                Motivation::new(
                    "Your future patients are counting on the knowledge you're building today! ❤️",
                    "The human touch in healthcare can't be replaced. Your empathy combined with \
                     knowledge will make a difference.",
                ),
            ],
        );

        let mut style_tips = HashMap::new();
        style_tips.insert(
            LearningStyle::Visual,
            vec![
                StudyTip::new(
                    "Color-Code Your Notes",
                    "Use different colors for different subjects or concepts. Try blue for \
                     definitions, green for examples, and red for important points! 🌈",
                ),
                StudyTip::new(
                    "Mind Map Magic",
                    "Create visual mind maps to connect ideas. Start with a main concept in the \
                     center and branch out. It's like creating art while you learn! 🧠",
                ),
            ],
        );
        style_tips.insert(
            LearningStyle::HandsOn,
            vec![
                StudyTip::new(
                    "Teach Someone Else",
                    "Explain what you learned to a friend, family member, or even your pet! If \
                     you can teach it, you truly understand it. 🗣️",
                ),
                StudyTip::new(
                    "Create Study Models",
                    "Build physical models or use everyday objects to represent concepts. \
                     Learning through doing sticks better! 🔧",
                ),
            ],
        );
        style_tips.insert(
            LearningStyle::Social,
            vec![
                StudyTip::new(
                    "Form a Study Squad",
                    "Team up with classmates for regular study sessions. You can quiz each \
                     other, share notes, and keep everyone motivated! 👥",
                ),
                StudyTip::new(
                    "Online Study Groups",
                    "Join online communities related to your subjects. Discussing concepts with \
                     peers worldwide opens new perspectives! 🌐",
                ),
            ],
        );
        style_tips.insert(
            LearningStyle::Structured,
            vec![
                StudyTip::new(
                    "The 25-5 Rule",
                    "Study for 25 minutes, then take a 5-minute break. Your brain will thank \
                     you! Try listening to your favorite song during breaks. 🎵",
                ),
                StudyTip::new(
                    "Weekly Planning Ritual",
                    "Every Sunday, plan your study schedule for the week. Include specific \
                     topics, times, and even reward breaks. Structure = Success! 📅",
                ),
            ],
        );

        let engineering_greeting = ClusterGreeting::new(
            "Hey there, future engineer! 🔧",
            "Ready to build amazing things? Here's your personalized tech-focused guidance!",
        );

        let mut greetings = HashMap::new();
        greetings.insert(CourseCluster::Engineering, engineering_greeting.clone());
        greetings.insert(
            CourseCluster::Business,
            ClusterGreeting::new(
                "Hello, future business leader! 💼",
                "Time to develop those leadership skills! Your business-focused tips await!",
            ),
        );
        greetings.insert(
            CourseCluster::Design,
            ClusterGreeting::new(
                "Hey creative soul! 🎨",
                "Let's fuel that artistic passion! Your design-focused inspiration is here!",
            ),
        );
        greetings.insert(
            CourseCluster::Health,
            ClusterGreeting::new(
                "Hi there, future healthcare hero! 🏥",
                "Ready to make a difference in healthcare? Your caring journey starts here!",
            ),
        );

        Self {
            general_motivations,
            cluster_motivations,
            style_tips,
            greetings,
            default_greeting: engineering_greeting,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Returns the fixed confidence message for a raw level.
///
/// Levels 1–5 map to distinct messages; anything else resolves to the
/// level-3 message.
pub fn confidence_message(level: i64) -> &'static str {
    match level {
        1 => {
            "It's totally normal to feel nervous! Every great journey starts with a single \
             step. You're braver than you think! 🌱"
        }
        2 => {
            "You're building confidence! Remember, even small progress deserves celebration. \
             Keep going! 🌟"
        }
        3 => "You're doing great! This balanced confidence will take you far. Trust the process! 😊",
        4 => {
            "Look at that confidence! You're ready to tackle challenges head-on. Your positive \
             attitude is your superpower! 🚀"
        }
        5 => {
            "Wow! That confidence is contagious! Channel that energy into your studies and \
             watch amazing things happen! ⚡"
        }
        _ => confidence_message(ConfidenceLevel::default().value() as i64),
    }
}
