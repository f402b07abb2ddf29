//! Helpers for model-driven insertion: the prompt, locating the keyword in
//! the model's reply, and the hashtag annotation for SEO keywords

use super::offset::find_ignore_case;
use super::{InsertionResult, StrategyKind};

/// Keyword fragments that mark a keyword as SEO related
pub const SEO_TRIGGERS: &[&str] = &[
    "seo",
    "digital marketing",
    "keyword",
    "optimization",
    "search engine",
];

/// Hashtags attached to SEO related keywords
pub const SEO_HASHTAGS: &[&str] = &[
    "#SEO",
    "#DigitalMarketing",
    "#ContentMarketing",
    "#SearchEngineOptimization",
    "#KeywordResearch",
    "#MarketingTrends2025",
    "#GrowYourBusiness",
];

/// Whether `keyword` gets the hashtag annotation
#[must_use]
pub fn is_seo_related(keyword: &str) -> bool {
    let lower = keyword.to_lowercase();
    SEO_TRIGGERS.iter().any(|trigger| lower.contains(trigger))
}

/// `" (#SEO ...)"` for SEO related keywords, empty otherwise
#[must_use]
pub fn annotation(keyword: &str) -> String {
    if is_seo_related(keyword) {
        format!(" ({})", SEO_HASHTAGS.join(" "))
    } else {
        String::new()
    }
}

/// Instruction sent to the model
#[must_use]
pub fn build_prompt(text: &str, keyword: &str) -> String {
    format!(
        "Insert the keyword \"{keyword}\" into the following text naturally, ensuring \
         grammatical correctness and contextual relevance. The keyword must be inserted at \
         least once. If you cannot find a natural insertion point, append the keyword at the \
         end of the text. If the keyword is SEO-related (e.g., contains \"SEO\", \"marketing\", \
         \"keyword\", \"optimization\"), append relevant hashtags (e.g., #SEO, \
         #DigitalMarketing) after the keyword in parentheses. Preserve all whitespace, \
         newlines, and formatting in the original text. Return only the modified text without \
         any additional explanation.\n\nText: {text}"
    )
}

/// Append `keyword` and its annotation to `text`, separated by a space unless
/// the text already ends in whitespace
#[must_use]
pub fn append_annotated(text: &str, keyword: &str) -> InsertionResult {
    let separator = if text.ends_with(char::is_whitespace) || text.is_empty() {
        ""
    } else {
        " "
    };
    let tail = annotation(keyword);

    let mut updated = String::with_capacity(text.len() + keyword.len() + tail.len() + 1);
    updated.push_str(text);
    updated.push_str(separator);
    updated.push_str(keyword);
    updated.push_str(&tail);

    InsertionResult {
        updated_text: updated,
        inserted_at: text.len() + separator.len(),
        keyword_len: keyword.len(),
        strategy: StrategyKind::Generative,
    }
}

/// Build the result from a model `reply`: the keyword's first
/// case-insensitive occurrence, or an annotated append to `original` when
/// the model dropped it
#[must_use]
pub fn locate_in_reply(original: &str, reply: &str, keyword: &str) -> InsertionResult {
    match find_ignore_case(reply, keyword, 0) {
        Some(found) if !keyword.is_empty() => InsertionResult {
            keyword_len: found.len(),
            inserted_at: found.start,
            updated_text: reply.to_string(),
            strategy: StrategyKind::Generative,
        },
        _ => append_annotated(original, keyword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seo_detection_is_case_insensitive_substring() {
        assert!(is_seo_related("Local SEO"));
        assert!(is_seo_related("keyword research"));
        assert!(is_seo_related("Search Engine ranking"));
        assert!(!is_seo_related("marketing"));
        assert!(!is_seo_related("coffee"));
    }

    #[test]
    fn reply_containing_keyword() {
        let r = locate_in_reply("We sell beans.", "We sell Coffee beans.", "coffee");
        assert_eq!(r.updated_text, "We sell Coffee beans.");
        assert_eq!(r.inserted_at, 8);
        assert_eq!(r.highlighted(), "Coffee");
        assert_eq!(r.strategy, StrategyKind::Generative);
    }

    #[test]
    fn reply_without_keyword_appends_to_original() {
        let r = locate_in_reply("We sell beans.", "We sell beans!", "coffee");
        assert_eq!(r.updated_text, "We sell beans. coffee");
        assert_eq!(r.inserted_at, 15);
        assert_eq!(r.highlighted(), "coffee");
    }

    #[test]
    fn seo_keyword_append_carries_hashtags_outside_highlight() {
        let r = append_annotated("Grow traffic.\n", "SEO");
        assert_eq!(
            r.updated_text,
            "Grow traffic.\nSEO (#SEO #DigitalMarketing #ContentMarketing \
             #SearchEngineOptimization #KeywordResearch #MarketingTrends2025 #GrowYourBusiness)"
        );
        assert_eq!(r.inserted_at, 14);
        assert_eq!(r.keyword_len, 3);
        assert_eq!(r.highlighted(), "SEO");
    }

    #[test]
    fn prompt_embeds_keyword_and_text() {
        let prompt = build_prompt("Hello world", "rust");
        assert!(prompt.starts_with("Insert the keyword \"rust\""));
        assert!(prompt.ends_with("\n\nText: Hello world"));
    }
}
