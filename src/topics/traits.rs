// Topic classifier trait: swap-ready abstraction.
//
// The resolver and the recorder only need "label in, topic out". The default
// implementation is the catalog-driven TopicMatcher, but anything that can
// name a topic for a label fits here.

use super::matcher::TopicMatch;

/// Trait for mapping a free-text label to a canonical topic.
pub trait TopicClassifier {
    /// Classify a raw label. `None` means no topic was detected, which is a
    /// normal outcome rather than an error.
    fn classify(&self, label: &str) -> Option<TopicMatch>;
}
