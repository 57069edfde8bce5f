//! Title-fit sweep and term frequency digest.
//!
//! For each raw category, the most frequent title terms plus a curated key
//! list describe what titles in that category usually look like. Titles that
//! share no term with that description, or that contain a curated anti-key,
//! are listed for manual review.

use crate::anomaly::report::ReportSection;
use crate::model::record::Job;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

static FIT_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,_\-:/\s]").expect("valid title split regex"));

const DEFAULT_TOP_TERMS: usize = 15;

const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Curated keys for one raw category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeys {
    pub category: String,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub anti_keys: Vec<String>,
}

impl CategoryKeys {
    fn new(category: &str, keys: &[&str], anti_keys: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keys: keys.iter().map(|key| (*key).to_string()).collect(),
            anti_keys: anti_keys.iter().map(|key| (*key).to_string()).collect(),
        }
    }
}

/// Title-fit sweep settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleFitConfig {
    /// Number of most frequent terms taken per category.
    pub top_terms: usize,
    /// Categories to check, in report order.
    pub categories: Vec<CategoryKeys>,
}

impl Default for TitleFitConfig {
    fn default() -> Self {
        Self {
            top_terms: DEFAULT_TOP_TERMS,
            categories: vec![
                CategoryKeys::new("admin", &["chief", "ceo"], &["advisor", "liaison"]),
                CategoryKeys::new("director_a", &[], &["advisor", "liaison"]),
                CategoryKeys::new("chair", &["chairman"], &[]),
                CategoryKeys::new("director_c", &[], &[]),
                CategoryKeys::new("director_r", &[], &[]),
                CategoryKeys::new("director_d", &[], &[]),
                CategoryKeys::new("faculty", &["lecturer", "scientist", "instructor"], &[]),
                CategoryKeys::new("staff", &["research", "researcher", "advisor"], &[]),
                CategoryKeys::new("postdoc", &["postdoc"], &[]),
            ],
        }
    }
}

/// Splits a title into lower-cased frequency terms.
///
/// Words are split on whitespace; only alphanumeric characters and `-` are
/// kept; empty words and stopwords are dropped.
pub fn frequency_terms(title: &str) -> Vec<String> {
    title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|term| !term.is_empty() && !STOPWORDS.contains(&term.as_str()))
        .collect()
}

/// Splits a title on `,` `_` `-` `:` `/` and whitespace into lower-cased tokens.
pub fn fit_tokens(title: &str) -> Vec<String> {
    FIT_SPLIT_RE
        .split(title)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Returns the `k` most frequent terms with their counts.
///
/// Equal counts keep first-appearance order.
pub fn most_frequent_terms<'a, I>(titles: I, k: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = HashMap::<String, (usize, usize)>::new();
    let mut next_index = 0usize;
    for title in titles {
        for term in frequency_terms(title) {
            let entry = counts.entry(term).or_insert_with(|| {
                next_index += 1;
                (0, next_index)
            });
            entry.0 += 1;
        }
    }

    let mut ranked = counts
        .into_iter()
        .map(|(term, (count, first_seen))| (term, count, first_seen))
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(k)
        .map(|(term, count, _)| (term, count))
        .collect()
}

fn titles_in<'a>(jobs: &'a [Job], category: &'a str) -> impl Iterator<Item = &'a Job> {
    jobs.iter().filter(move |job| job.category == category)
}

/// Lists titles that do not look like their category.
///
/// Returns one section per configured category.
pub fn title_fit_sweep(jobs: &[Job], config: &TitleFitConfig) -> Vec<ReportSection> {
    let mut sections = Vec::with_capacity(config.categories.len());
    let mut flagged = 0usize;

    for keys in &config.categories {
        let mut fit = most_frequent_terms(
            titles_in(jobs, &keys.category).map(|job| job.title.as_str()),
            config.top_terms,
        )
        .into_iter()
        .map(|(term, _)| term)
        .collect::<BTreeSet<_>>();
        fit.extend(keys.keys.iter().map(|key| key.to_lowercase()));
        let anti = keys
            .anti_keys
            .iter()
            .map(|key| key.to_lowercase())
            .collect::<BTreeSet<_>>();

        let mut section = ReportSection::new(format!(
            "Job titles which may not fit in category {}:",
            keys.category
        ));
        for job in titles_in(jobs, &keys.category) {
            let tokens = fit_tokens(&job.title);
            let fits = tokens.iter().any(|token| fit.contains(token));
            let contradicts = tokens.iter().any(|token| anti.contains(token));
            if !fits || contradicts {
                section.push(format!("Person {}: {}", job.person_id, job.title));
            }
        }
        flagged += section.lines.len();
        sections.push(section);
    }

    info!(
        "event=title_fit_sweep module=anomaly status=ok categories={} flagged={}",
        config.categories.len(),
        flagged
    );
    sections
}

/// Textual digest of the most frequent title terms per category.
pub fn term_frequency_summary(jobs: &[Job], categories: &[String], k: usize) -> ReportSection {
    let mut section = ReportSection::new(format!(
        "The {k} most frequent job title terms in each job category are:"
    ));
    for category in categories {
        let rows = titles_in(jobs, category).count();
        section.push(format!("{category} (n={rows})"));
        let terms =
            most_frequent_terms(titles_in(jobs, category).map(|job| job.title.as_str()), k);
        for (term, count) in terms {
            section.push(format!("  - {term}: {count}"));
        }
    }
    section
}

#[cfg(test)]
mod tests {
    use super::{fit_tokens, frequency_terms, most_frequent_terms};

    #[test]
    fn frequency_terms_strip_punctuation_and_stopwords() {
        assert_eq!(
            frequency_terms("Professor of Chemistry, Co-Director"),
            vec!["professor", "chemistry", "co-director"]
        );
    }

    #[test]
    fn fit_tokens_split_on_title_separators() {
        assert_eq!(
            fit_tokens("Assoc. Dean/Research_Faculty-Affairs: Chair"),
            vec!["assoc.", "dean", "research", "faculty", "affairs", "chair"]
        );
    }

    #[test]
    fn fit_tokens_split_on_any_whitespace_like_frequency_terms() {
        let title = "Senior\tLecturer\n Physics";
        assert_eq!(fit_tokens(title), vec!["senior", "lecturer", "physics"]);
        assert_eq!(fit_tokens(title), frequency_terms(title));
    }

    #[test]
    fn most_frequent_terms_break_ties_by_first_appearance() {
        let titles = ["professor biology", "professor physics", "biology lecturer"];
        let top = most_frequent_terms(titles, 3);
        assert_eq!(
            top,
            vec![
                ("professor".to_string(), 2),
                ("biology".to_string(), 2),
                ("physics".to_string(), 1),
            ]
        );
    }
}
