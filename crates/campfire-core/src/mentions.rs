//! `@mention` parsing and rendering
//!
//! Usernames are word characters only, so a mention is the longest run of
//! `\w` after an `@`. The same pattern drives both record creation and the
//! HTML highlighting of stored text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::entities::User;
use crate::traits::{RepoResult, UserRepository};
use crate::value_objects::Snowflake;

static MENTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("mention pattern compiles"));

/// Distinct mentioned usernames in first-seen order
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for caps in MENTION_PATTERN.captures_iter(text) {
        let name = &caps[1];
        if !seen.iter().any(|s| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

/// Resolves mentions in user-authored text against the user store.
pub struct MentionParser;

impl MentionParser {
    /// Users mentioned in `text`, excluding the author and unknown names.
    ///
    /// Each user appears at most once no matter how often they are mentioned.
    pub async fn resolve(
        text: &str,
        author_id: Snowflake,
        users: &dyn UserRepository,
    ) -> RepoResult<Vec<User>> {
        let names = extract_mentions(text);
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut found = users.find_by_usernames(&names).await?;
        found.retain(|u| u.id != author_id);
        found.sort_by_key(|u| names.iter().position(|n| *n == u.username));
        found.dedup_by_key(|u| u.id);
        Ok(found)
    }

    /// Username to id map for every known user mentioned in `text`
    pub async fn known_users(
        text: &str,
        users: &dyn UserRepository,
    ) -> RepoResult<HashMap<String, Snowflake>> {
        let names = extract_mentions(text);
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(users
            .find_by_usernames(&names)
            .await?
            .into_iter()
            .map(|u| (u.username, u.id))
            .collect())
    }
}

/// Escape the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap known `@name` tokens in profile links; unknown names stay as text.
pub fn highlight_mentions(html: &str, known: &HashMap<String, Snowflake>) -> String {
    MENTION_PATTERN
        .replace_all(html, |caps: &Captures<'_>| match known.get(&caps[1]) {
            Some(id) => format!(r#"<a href="/user/{id}" class="mention">@{}</a>"#, &caps[1]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Escaped text with line breaks and highlighted mentions, ready for display
pub fn render_content_html(text: &str, known: &HashMap<String, Snowflake>) -> String {
    let escaped = escape_html(text).replace('\n', "<br>");
    highlight_mentions(&escaped, known)
}
