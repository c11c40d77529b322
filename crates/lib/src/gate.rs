//! # Relevance Gate
//!
//! A cheap keyword heuristic that decides whether a practice-question request
//! is about an academic topic. It runs before any document is read and before
//! any completion call is made.

use serde::Deserialize;
use tracing::debug;

const DEFAULT_KEYWORDS: &[&str] = &[
    // Computer science and IT
    "algorithm",
    "data structure",
    "programming",
    "software",
    "database",
    "operating system",
    "network",
    "machine learning",
    "artificial intelligence",
    "web",
    "development",
    "computation",
    "architecture",
    "compiler",
    "memory",
    "process",
    "thread",
    "sql",
    "query",
    "normalization",
    "index",
    "transaction",
    "protocol",
    "routing",
    "encryption",
    "security",
    "api",
    "interface",
    // Mathematics
    "calculus",
    "algebra",
    "geometry",
    "statistics",
    "probability",
    "theorem",
    "equation",
    "function",
    "matrix",
    "vector",
    "differential",
    "integral",
    // General academic
    "theory",
    "concept",
    "principle",
    "law",
    "formula",
    "method",
    "analysis",
    "design",
    "evaluation",
    "research",
    "study",
    "experiment",
    "model",
];

const DEFAULT_SUBJECTS: &[&str] = &[
    "data structures & algorithms",
    "dsa",
    "operating systems",
    "os",
    "database management systems",
    "dbms",
    "computer networks",
    "cn",
    "machine learning",
    "ml",
    "web development",
    "software engineering",
    "artificial intelligence",
    "theory of computation",
    "computer architecture",
];

/// The keyword and subject lists the gate matches against.
///
/// Matching is a case-insensitive substring test, so short entries such as
/// `"os"` also match inside longer words.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelevanceGate {
    /// Accepted when found in either the topic or the subject.
    pub keywords: Vec<String>,
    /// Accepted when found in the subject.
    pub subjects: Vec<String>,
}

impl Default for RelevanceGate {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RelevanceGate {
    pub fn new(keywords: Vec<String>, subjects: Vec<String>) -> Self {
        Self { keywords, subjects }
    }

    /// Returns `true` if the subject/topic pair looks academic.
    pub fn is_academic(&self, subject: &str, topic: &str) -> bool {
        let subject = subject.to_lowercase();
        let topic = topic.to_lowercase();

        let keyword_hit = self.keywords.iter().find(|keyword| {
            let keyword = keyword.to_lowercase();
            topic.contains(&keyword) || subject.contains(&keyword)
        });
        if let Some(keyword) = keyword_hit {
            debug!("Relevance gate matched keyword '{}'", keyword);
            return true;
        }

        let subject_hit = self
            .subjects
            .iter()
            .find(|known| subject.contains(&known.to_lowercase()));
        if let Some(known) = subject_hit {
            debug!("Relevance gate matched subject '{}'", known);
            return true;
        }

        false
    }
}
