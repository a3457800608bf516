//! Word counts and read-time estimates for post bodies

use pulldown_cmark::{Event, Options, Parser};

/// Reading speed used for read-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Count the words of a markdown body, including code blocks
pub fn word_count(markdown: &str) -> usize {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);

    parser
        .map(|event| match event {
            Event::Text(text) | Event::Code(text) => count_words(&text),
            _ => 0,
        })
        .sum()
}

/// Estimated read time in whole minutes, never less than one
pub fn estimate_read_time(markdown: &str) -> u32 {
    let words = word_count(markdown);
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .count()
}
