//! Job Catalog Matcher: skill-gap computation between a candidate and postings.
//!
//! Skills compare case-insensitively after trimming; outputs keep the
//! posting's original spelling and order.

use std::collections::HashSet;

use crate::analysis::models::CareerDomain;
use crate::catalog::models::{JobCatalog, JobPosting, MatchedJob};

/// Matches `skills` against every posting filed under `domain`.
///
/// A domain with no catalog entry yields an empty list. Results are ranked by
/// number of matching skills, ties keeping catalog order.
pub fn match_jobs(domain: CareerDomain, skills: &[String], catalog: &JobCatalog) -> Vec<MatchedJob> {
    let Some(postings) = catalog.postings(domain) else {
        return Vec::new();
    };

    let candidate = normalized_set(skills);
    let mut matched: Vec<MatchedJob> = postings
        .iter()
        .map(|posting| compute_skill_gap(posting, &candidate))
        .collect();

    // sort_by is stable
    matched.sort_by(|a, b| b.matching_skills.len().cmp(&a.matching_skills.len()));
    matched
}

/// Partitions a posting's required skills into matching and missing.
pub fn compute_skill_gap(posting: &JobPosting, candidate: &HashSet<String>) -> MatchedJob {
    let (matching_skills, missing_skills) = posting
        .required_skills
        .iter()
        .cloned()
        .partition(|skill| candidate.contains(&normalize_skill(skill)));

    MatchedJob {
        posting: posting.clone(),
        matching_skills,
        missing_skills,
    }
}

pub fn normalized_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::catalog::models::CatalogSource;

    fn posting(id: &str, skills: &[&str]) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: format!("Job {id}"),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: String::new(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn catalog(domain: CareerDomain, postings: Vec<JobPosting>) -> JobCatalog {
        JobCatalog::new(HashMap::from([(domain, postings)]), CatalogSource::Static)
    }

    #[test]
    fn test_basic_skill_gap() {
        let catalog = catalog(
            CareerDomain::SoftwareDevelopment,
            vec![posting("1", &["Python", "AWS"])],
        );
        let matched = match_jobs(
            CareerDomain::SoftwareDevelopment,
            &strings(&["Python", "SQL"]),
            &catalog,
        );

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].matching_skills, vec!["Python"]);
        assert_eq!(matched[0].missing_skills, vec!["AWS"]);
    }

    #[test]
    fn test_absent_domain_is_empty() {
        let catalog = catalog(CareerDomain::DataScience, vec![posting("1", &["SQL"])]);
        let matched = match_jobs(CareerDomain::Cybersecurity, &strings(&["SQL"]), &catalog);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_comparison_ignores_case_and_whitespace_but_keeps_spelling() {
        let catalog = catalog(
            CareerDomain::DataScience,
            vec![posting("1", &[" Machine Learning", "SQL ", "pandas"])],
        );
        let matched = match_jobs(
            CareerDomain::DataScience,
            &strings(&["machine learning  ", "PANDAS"]),
            &catalog,
        );

        assert_eq!(matched[0].matching_skills, vec![" Machine Learning", "pandas"]);
        assert_eq!(matched[0].missing_skills, vec!["SQL "]);
    }

    #[test]
    fn test_partition_preserves_order_and_multiplicity() {
        let cases: Vec<(Vec<&str>, Vec<&str>)> = vec![
            (vec![], vec!["Go", "Rust"]),
            (vec!["Go"], vec![]),
            (vec!["go", "RUST"], vec!["Rust", "Go", "Rust", "Kafka", "go"]),
            (vec!["Kafka"], vec!["A", "kafka", "B", "KAFKA", "C"]),
            (vec![""], vec!["", " "]),
        ];

        for (candidate, required) in cases {
            let candidate_set = normalized_set(&strings(&candidate));
            let job = compute_skill_gap(&posting("p", &required), &candidate_set);

            // Merging the two lists back in required order reproduces required exactly.
            let mut matching = job.matching_skills.iter();
            let mut missing = job.missing_skills.iter();
            for skill in &required {
                let has = candidate_set.contains(&skill.trim().to_lowercase());
                let next = if has { matching.next() } else { missing.next() };
                assert_eq!(next.map(String::as_str), Some(*skill));
            }
            assert!(matching.next().is_none());
            assert!(missing.next().is_none());
            assert_eq!(
                job.matching_skills.len() + job.missing_skills.len(),
                required.len()
            );
        }
    }

    #[test]
    fn test_ranked_by_matches_with_stable_ties() {
        let catalog = catalog(
            CareerDomain::SoftwareDevelopment,
            vec![
                posting("none", &["Java"]),
                posting("one-a", &["Rust", "Java"]),
                posting("two", &["Rust", "SQL"]),
                posting("one-b", &["SQL", "Java"]),
            ],
        );
        let matched = match_jobs(
            CareerDomain::SoftwareDevelopment,
            &strings(&["rust", "sql"]),
            &catalog,
        );
        let ids: Vec<&str> = matched.iter().map(|m| m.posting.id.as_str()).collect();
        assert_eq!(ids, vec!["two", "one-a", "one-b", "none"]);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let catalog = catalog(CareerDomain::DataScience, vec![posting("1", &["SQL", "R"])]);
        let skills = strings(&["sql"]);
        let before = catalog.postings(CareerDomain::DataScience).unwrap().to_vec();

        let _ = match_jobs(CareerDomain::DataScience, &skills, &catalog);

        assert_eq!(catalog.postings(CareerDomain::DataScience).unwrap(), before.as_slice());
        assert_eq!(skills, vec!["sql"]);
    }
}
