//! Summary statistics derived from a user's repository list.

use std::collections::HashMap;

use serde::Serialize;

use crate::github::types::RepositoryRecord;

/// Number of repositories kept in the top-by-stars ranking.
pub const TOP_REPOS: usize = 5;

/// How many repositories list `name` as their primary language.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LanguageCount {
    pub name: String,
    pub value: u64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    pub total_stars: u64,
    pub total_forks: u64,
    /// Rounded half up: `(total_stars + n / 2) / n`.
    pub avg_stars: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TopRepoEntry {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
    pub description: Option<String>,
    pub url: String,
    pub language: Option<String>,
}

impl From<&RepositoryRecord> for TopRepoEntry {
    fn from(record: &RepositoryRecord) -> Self {
        Self {
            name: record.name.clone(),
            stars: record.stars(),
            forks: record.forks(),
            description: record.description.clone(),
            url: record.html_url.clone(),
            language: record.language.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub languages: Vec<LanguageCount>,
    pub stats: RepoStats,
    pub top_repos: Vec<TopRepoEntry>,
}

impl Aggregate {
    /// False when no record carried a primary language.
    pub fn has_language_data(&self) -> bool {
        !self.languages.is_empty()
    }
}

/// Compute the language histogram, totals, and top repositories.
///
/// `records` must be non-empty; the average divides by its length.
pub fn aggregate(records: &[RepositoryRecord]) -> Aggregate {
    Aggregate {
        languages: language_histogram(records),
        stats: repo_stats(records),
        top_repos: top_repos(records, TOP_REPOS),
    }
}

/// Count records per language, sorted by count descending.
/// Equal counts keep the order in which each language was first seen.
pub fn language_histogram(records: &[RepositoryRecord]) -> Vec<LanguageCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LanguageCount> = Vec::new();

    for lang in records.iter().filter_map(|r| r.language.as_deref()) {
        match index.get(lang) {
            Some(&i) => counts[i].value += 1,
            None => {
                index.insert(lang, counts.len());
                counts.push(LanguageCount {
                    name: lang.to_string(),
                    value: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.value.cmp(&a.value));
    counts
}

pub fn repo_stats(records: &[RepositoryRecord]) -> RepoStats {
    let total_stars: u64 = records.iter().map(RepositoryRecord::stars).sum();
    let total_forks: u64 = records.iter().map(RepositoryRecord::forks).sum();
    let n = records.len() as u64;
    debug_assert!(n > 0, "repo_stats requires at least one record");
    let avg_stars = if n == 0 { 0 } else { (total_stars + n / 2) / n };
    RepoStats {
        total_stars,
        total_forks,
        avg_stars,
    }
}

/// The `limit` most starred records; ties keep input order.
pub fn top_repos(records: &[RepositoryRecord], limit: usize) -> Vec<TopRepoEntry> {
    let mut ranked: Vec<&RepositoryRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.stars().cmp(&a.stars()));
    ranked.into_iter().take(limit).map(TopRepoEntry::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::record;

    fn sample() -> Vec<RepositoryRecord> {
        vec![
            record("a", Some("Go"), 10),
            record("b", Some("Go"), 5),
            record("c", None, 1),
            record("d", Some("Rust"), 20),
        ]
    }

    #[test]
    fn end_to_end_sample() {
        let agg = aggregate(&sample());

        assert_eq!(
            agg.languages,
            vec![
                LanguageCount {
                    name: "Go".into(),
                    value: 2
                },
                LanguageCount {
                    name: "Rust".into(),
                    value: 1
                },
            ]
        );
        assert_eq!(agg.stats.total_stars, 36);
        assert_eq!(agg.stats.avg_stars, 9);
        let stars: Vec<_> = agg.top_repos.iter().map(|r| r.stars).collect();
        assert_eq!(stars, [20, 10, 5, 1]);
        assert!(agg.has_language_data());
    }

    #[test]
    fn language_values_sum_to_records_with_language() {
        let records = sample();
        let agg = aggregate(&records);
        let sum: u64 = agg.languages.iter().map(|l| l.value).sum();
        let with_lang = records.iter().filter(|r| r.language.is_some()).count() as u64;
        assert_eq!(sum, with_lang);
    }

    #[test]
    fn language_ties_keep_discovery_order() {
        let records = vec![
            record("a", Some("Python"), 0),
            record("b", Some("C"), 0),
            record("c", Some("Zig"), 0),
            record("d", Some("C"), 0),
            record("e", Some("Zig"), 0),
        ];
        let names: Vec<_> = language_histogram(&records)
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["C", "Zig", "Python"]);
    }

    #[test]
    fn no_languages_reports_missing_data() {
        let records = vec![record("a", None, 3), record("b", None, 4)];
        let agg = aggregate(&records);
        assert!(!agg.has_language_data());
        assert_eq!(agg.stats.total_stars, 7);
    }

    #[test]
    fn average_rounds_half_up() {
        let records = vec![record("a", None, 1), record("b", None, 2)];
        assert_eq!(repo_stats(&records).avg_stars, 2);

        let records = vec![
            record("a", None, 1),
            record("b", None, 0),
            record("c", None, 0),
        ];
        assert_eq!(repo_stats(&records).avg_stars, 0);
    }

    #[test]
    fn totals_treat_missing_counts_as_zero() {
        let mut r = record("a", Some("Go"), 0);
        r.stargazers_count = None;
        r.forks_count = None;
        let records = vec![r, record("b", Some("Go"), 4)];
        let stats = repo_stats(&records);
        assert_eq!(stats.total_stars, 4);
        assert_eq!(stats.total_forks, 0);
        assert_eq!(stats.avg_stars, 2);
    }

    #[test]
    fn top_repos_truncates_to_five() {
        let records: Vec<_> = (0..8u64)
            .map(|i| record(&format!("r{i}"), Some("Go"), i))
            .collect();
        let top = top_repos(&records, TOP_REPOS);
        let stars: Vec<_> = top.iter().map(|r| r.stars).collect();
        assert_eq!(stars, [7, 6, 5, 4, 3]);
    }

    #[test]
    fn top_repos_fewer_than_limit() {
        let records = vec![record("a", None, 1), record("b", None, 2)];
        assert_eq!(top_repos(&records, TOP_REPOS).len(), 2);
    }

    #[test]
    fn top_repos_ties_keep_input_order() {
        let records = vec![
            record("first", None, 3),
            record("big", None, 9),
            record("second", None, 3),
            record("third", None, 3),
        ];
        let names: Vec<_> = top_repos(&records, TOP_REPOS)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["big", "first", "second", "third"]);
    }

    #[test]
    fn top_entry_carries_display_fields() {
        let mut r = record("lens", Some("Rust"), 12);
        r.description = Some("stats".into());
        r.forks_count = Some(3);
        let entry = TopRepoEntry::from(&r);
        assert_eq!(entry.url, "https://github.com/octocat/lens");
        assert_eq!(entry.forks, 3);
        assert_eq!(entry.description.as_deref(), Some("stats"));
        assert_eq!(entry.language.as_deref(), Some("Rust"));
    }

    #[test]
    fn stats_serialize_camel_case() {
        let json = serde_json::to_value(RepoStats {
            total_stars: 1,
            total_forks: 2,
            avg_stars: 3,
        })
        .unwrap();
        assert_eq!(json["totalStars"], 1);
        assert_eq!(json["totalForks"], 2);
        assert_eq!(json["avgStars"], 3);
    }
}
