//! Query filtering for the command list.
//!
//! A query first selects commands whose name or description contains it
//! (case-insensitively). Only when nothing contains it do names get ranked
//! by character-match similarity instead.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use similar::TextDiff;

use crate::command_definitions::Command;

/// Similarity a name must exceed to survive the fuzzy fallback.
pub const FUZZY_SCORE_THRESHOLD: u8 = 30;
/// Most candidates the fuzzy fallback keeps.
pub const FUZZY_CANDIDATE_LIMIT: usize = 10;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W").expect("non-word character pattern"));

/// Filters `commands` for `query`.
///
/// An empty query returns every command in the original order.
///
/// # Examples
///
/// ```
/// use shell_launcher_core::command_definitions::Command;
/// use shell_launcher_core::search::filter;
///
/// let commands = vec![
///     Command::function("deploy", ""),
///     Command::function("deploy_staging", ""),
///     Command::alias("gs", "show git status", "git status"),
/// ];
///
/// let found = filter(&commands, "deploy");
/// assert_eq!(found.len(), 2);
/// ```
#[must_use]
pub fn filter(commands: &[Command], query: &str) -> Vec<Command> {
    if query.is_empty() {
        return commands.to_vec();
    }

    let substring_matches = substring_matches(commands, query);
    if !substring_matches.is_empty() {
        return substring_matches;
    }

    debug!("No substring match for `{query}`, ranking names by similarity");
    fuzzy_matches(commands, query)
}

fn substring_matches(commands: &[Command], query: &str) -> Vec<Command> {
    let query = query.to_lowercase();

    commands
        .iter()
        .filter(|command| {
            command.name.to_lowercase().contains(&query)
                || command.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Names ranked by [`fuzzy_ratio`], best first. Ties keep the original order.
fn fuzzy_matches(commands: &[Command], query: &str) -> Vec<Command> {
    let mut scored: Vec<(&Command, u8)> = commands
        .iter()
        .map(|command| (command, fuzzy_ratio(query, &command.name)))
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(FUZZY_CANDIDATE_LIMIT)
        .filter(|(_, score)| *score > FUZZY_SCORE_THRESHOLD)
        .map(|(command, _)| command.clone())
        .collect()
}

/// Similarity of two strings on a 0–100 scale.
///
/// Both sides are [`normalize`]d first. The score is twice the number of
/// characters the two have in common, in order, over their combined length.
/// Anything that normalizes to nothing scores 0.
#[must_use]
pub fn fuzzy_ratio(query: &str, candidate: &str) -> u8 {
    let query = normalize(query);
    let candidate = normalize(candidate);
    if query.is_empty() || candidate.is_empty() {
        return 0;
    }

    let similarity = TextDiff::from_chars(query.as_str(), candidate.as_str()).ratio();

    (f64::from(similarity) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Lowercased, with every character other than letters, digits and `_`
/// turned into a space, and trimmed.
fn normalize(text: &str) -> String {
    NON_WORD.replace_all(text, " ").trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn functions(names: &[&str]) -> Vec<Command> {
        names.iter().map(|n| Command::function(n, "")).collect()
    }

    fn names(commands: &[Command]) -> Vec<&str> {
        commands.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let commands = functions(&["b", "a", "c"]);
        assert_eq!(filter(&commands, ""), commands);
    }

    #[test]
    fn test_substring_match_keeps_original_order() {
        let commands = functions(&["deploy", "build", "deploy_staging"]);
        assert_eq!(
            names(&filter(&commands, "deploy")),
            vec!["deploy", "deploy_staging"]
        );
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let commands = functions(&["GitPush", "other"]);
        assert_eq!(names(&filter(&commands, "gitp")), vec!["GitPush"]);
    }

    #[test]
    fn test_substring_matches_description() {
        let commands = vec![
            Command::alias("gs", "show git status", "git status"),
            Command::alias("ll", "long listing", "ls -la"),
        ];
        assert_eq!(names(&filter(&commands, "STATUS")), vec!["gs"]);
    }

    #[test]
    fn test_fuzzy_fallback_when_nothing_contains_query() {
        let commands = functions(&["build", "deploy", "deploy_staging"]);
        let found = filter(&commands, "dpeloy");

        assert_eq!(found[0].name, "deploy");
        assert!(found
            .iter()
            .all(|c| fuzzy_ratio("dpeloy", &c.name) > FUZZY_SCORE_THRESHOLD));
    }

    #[test]
    fn test_fuzzy_fallback_orders_by_score() {
        let commands = functions(&["gsta", "gst"]);
        assert_eq!(names(&filter(&commands, "gsx")), vec!["gst", "gsta"]);
    }

    #[test]
    fn test_fuzzy_fallback_ignores_descriptions() {
        let commands = vec![Command::alias("zz", "deploy everything", "true")];
        assert!(filter(&commands, "dpeloy").is_empty());
    }

    #[test]
    fn test_fuzzy_fallback_respects_candidate_limit() {
        let names_owned: Vec<String> = (0..20).map(|i| format!("cmd{i:02}")).collect();
        let name_refs: Vec<&str> = names_owned.iter().map(String::as_str).collect();
        let commands = functions(&name_refs);

        let found = filter(&commands, "cmdxx");

        assert_eq!(found.len(), FUZZY_CANDIDATE_LIMIT);
        assert_eq!(found[0].name, "cmd00");
        assert_eq!(found[9].name, "cmd09");
    }

    #[test]
    fn test_fuzzy_fallback_can_find_nothing() {
        let commands = functions(&["alpha", "beta"]);
        assert!(filter(&commands, "qqqqqqqq").is_empty());
    }

    #[test]
    fn test_fuzzy_ratio_bounds() {
        assert_eq!(fuzzy_ratio("deploy", "deploy"), 100);
        assert_eq!(fuzzy_ratio("Deploy", "dEPLOY"), 100);
        assert_eq!(fuzzy_ratio("abc", "xyz"), 0);
        assert_eq!(fuzzy_ratio("dpeloy", "deploy"), 83);
    }

    #[test]
    fn test_fuzzy_ratio_against_long_names() {
        assert_eq!(fuzzy_ratio("dokcer", "docker_compose_up"), 43);
        assert_eq!(fuzzy_ratio("gti", "git_status"), 31);
    }

    #[test]
    fn test_fuzzy_fallback_finds_typos_in_long_names() {
        let commands = functions(&["docker_compose_up", "gs"]);
        assert_eq!(names(&filter(&commands, "dokcer")), vec!["docker_compose_up"]);

        let commands = functions(&["git_status", "ll"]);
        assert_eq!(names(&filter(&commands, "gti")), vec!["git_status"]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Deploy-Staging!"), "deploy staging");
        assert_eq!(normalize("  backup_home "), "backup_home");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_fuzzy_ratio_ignores_punctuation() {
        assert_eq!(fuzzy_ratio("deploy!", "deploy"), 100);
        assert_eq!(fuzzy_ratio("--", "deploy"), 0);
    }
}
