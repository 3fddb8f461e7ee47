//! Markdown rendering of a [`DashboardData`] bundle for terminal output.

use crate::dashboard::DashboardData;
use crate::github::types::UserProfile;
use crate::stats::{LanguageCount, TopRepoEntry};

/// Render the full report: profile, language breakdown, totals, and top repositories.
pub fn format_dashboard(user: &str, data: &DashboardData) -> String {
    let mut out = String::new();

    match &data.profile {
        Some(profile) => format_profile(profile, &mut out),
        None => out.push_str(&format!("# {}\n\n", sanitize_heading(user))),
    }

    format_languages(&data.languages, &mut out);

    out.push_str("## Totals\n\n");
    out.push_str("| Metric | Value |\n|--------|-------|\n");
    out.push_str(&format!("| Repositories | {} |\n", data.repo_count));
    out.push_str(&format!("| Stars | {} |\n", data.stats.total_stars));
    out.push_str(&format!("| Forks | {} |\n", data.stats.total_forks));
    out.push_str(&format!("| Avg stars / repo | {} |\n\n", data.stats.avg_stars));

    format_top_repos(&data.top_repos, &mut out);

    out
}

fn format_profile(profile: &UserProfile, out: &mut String) {
    let title = match &profile.name {
        Some(name) => format!("{name} (@{})", profile.login),
        None => format!("@{}", profile.login),
    };
    out.push_str(&format!("# {}\n\n", sanitize_heading(&title)));

    if let Some(ref bio) = profile.bio {
        out.push_str(&format!("{}\n\n", bio.trim()));
    }

    out.push_str(&format!(
        "followers: {} · following: {} · public repos: {} · gists: {}\n",
        profile.followers, profile.following, profile.public_repos, profile.public_gists
    ));
    if let Some(ref location) = profile.location {
        out.push_str(&format!("location: {location}\n"));
    }
    if let Some(ref url) = profile.html_url {
        out.push_str(&format!("profile: {url}\n"));
    }
    out.push('\n');
}

fn format_languages(languages: &[LanguageCount], out: &mut String) {
    out.push_str("## Languages\n\n");
    let total: u64 = languages.iter().map(|l| l.value).sum();
    out.push_str("| Language | Repos | Share |\n|----------|-------|-------|\n");
    for lang in languages {
        let share = lang.value as f64 * 100.0 / total.max(1) as f64;
        out.push_str(&format!("| {} | {} | {share:.1}% |\n", lang.name, lang.value));
    }
    out.push('\n');
}

fn format_top_repos(repos: &[TopRepoEntry], out: &mut String) {
    if repos.is_empty() {
        return;
    }
    out.push_str("## Top Repositories\n\n");
    for (i, repo) in repos.iter().enumerate() {
        let lang = repo
            .language
            .as_deref()
            .map(|l| format!(" [{l}]"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{}. [{}]({}) ★ {} · forks {}{}\n",
            i + 1,
            escape_md_link(&repo.name),
            repo.url,
            repo.stars,
            repo.forks,
            lang
        ));
        if let Some(desc) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push_str(&format!("   {}\n", desc.trim()));
        }
    }
    out.push('\n');
}

/// Escape characters that break Markdown link syntax.
fn escape_md_link(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '[' | ']' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn sanitize_heading(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
