// Label resolution: pick a topic for a quiz from its surrounding labels.
//
// Quiz names are often generic ("TEST 4", "Simulacro final"), so when the
// quiz name says nothing we fall back to the course name, then to the names
// of the question categories the quiz draws from.

use serde::{Deserialize, Serialize};

use super::matcher::TopicMatch;
use super::traits::TopicClassifier;

/// The labels known for a single quiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizLabels {
    pub quiz_name: String,
    pub course_name: Option<String>,
    pub category_names: Vec<String>,
}

impl QuizLabels {
    pub fn new(quiz_name: impl Into<String>) -> Self {
        Self {
            quiz_name: quiz_name.into(),
            ..Default::default()
        }
    }

    pub fn with_course(mut self, course_name: impl Into<String>) -> Self {
        self.course_name = Some(course_name.into());
        self
    }

    pub fn with_category(mut self, category_name: impl Into<String>) -> Self {
        self.category_names.push(category_name.into());
        self
    }
}

/// Which label produced the topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelSource {
    Quiz,
    Course,
    QuestionCategory,
}

impl LabelSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelSource::Quiz => "quiz name",
            LabelSource::Course => "course name",
            LabelSource::QuestionCategory => "question category",
        }
    }
}

impl std::fmt::Display for LabelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved topic plus the label it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub matched: TopicMatch,
    pub source: LabelSource,
    /// The raw label that matched
    pub label: String,
}

/// Resolve a quiz's topic: quiz name, then course name, then each question
/// category in order. First hit wins.
pub fn resolve(classifier: &dyn TopicClassifier, labels: &QuizLabels) -> Option<Resolution> {
    let candidates = std::iter::once((LabelSource::Quiz, labels.quiz_name.as_str()))
        .chain(
            labels
                .course_name
                .iter()
                .map(|c| (LabelSource::Course, c.as_str())),
        )
        .chain(
            labels
                .category_names
                .iter()
                .map(|c| (LabelSource::QuestionCategory, c.as_str())),
        );

    for (source, label) in candidates {
        if let Some(matched) = classifier.classify(label) {
            return Some(Resolution {
                matched,
                source,
                label: label.to_string(),
            });
        }
    }

    None
}
