//! Time-tag lyrics parser
//!
//! Accepts either time-tagged lyrics:
//! [01:02.50] Hello world
//! [00:12][00:48] Chorus line
//!
//! or untimed plain text, one line per row (or per sentence when the text
//! has no line breaks at all).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

static TIME_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d{1,2}):(\d{2})(?:\.(\d{1,3}))?\]").expect("time tag pattern is valid")
});

const SENTENCE_END: &[char] = &['.', '!', '?', '。', '！', '？', '…'];

/// A single lyric row.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Seconds from the start of the track; `None` for untimed lyrics
    pub time_secs: Option<f64>,
    pub text: String,
}

impl LyricLine {
    pub fn timed(time_secs: f64, text: impl Into<String>) -> Self {
        Self {
            time_secs: Some(time_secs),
            text: text.into(),
        }
    }

    pub fn untimed(text: impl Into<String>) -> Self {
        Self {
            time_secs: None,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsMode {
    /// Every line carries a timestamp, sorted ascending
    Tagged,
    /// No timestamps; position is estimated from playback progress
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLyrics {
    pub lines: Vec<LyricLine>,
    pub mode: LyricsMode,
}

impl Default for ParsedLyrics {
    fn default() -> Self {
        Self::empty()
    }
}

impl ParsedLyrics {
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            mode: LyricsMode::Plain,
        }
    }

    /// Parse raw lyric text. Never fails; unusable input yields no lines.
    pub fn parse(content: &str) -> Self {
        if content.trim().is_empty() {
            return Self::empty();
        }

        if TIME_TAG.is_match(content) {
            Self {
                lines: parse_tagged(content),
                mode: LyricsMode::Tagged,
            }
        } else {
            Self {
                lines: parse_plain(content),
                mode: LyricsMode::Plain,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_tagged(&self) -> bool {
        self.mode == LyricsMode::Tagged
    }
}

fn parse_tagged(content: &str) -> Vec<LyricLine> {
    // Keyed by whole milliseconds so duplicates collapse and order falls out.
    let mut by_ms: BTreeMap<u64, LyricLine> = BTreeMap::new();

    for raw in content.lines() {
        let stamps: Vec<f64> = TIME_TAG
            .captures_iter(raw)
            .filter_map(|caps| {
                let minutes: f64 = caps.get(1)?.as_str().parse().ok()?;
                let seconds: f64 = caps.get(2)?.as_str().parse().ok()?;
                let fraction = caps.get(3).map(|m| scale_fraction(m.as_str())).unwrap_or(0.0);
                Some(minutes * 60.0 + seconds + fraction)
            })
            .collect();

        if stamps.is_empty() {
            continue;
        }

        let text = TIME_TAG.replace_all(raw, "");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        for secs in stamps {
            let key = (secs * 1000.0).round() as u64;
            by_ms
                .entry(key)
                .or_insert_with(|| LyricLine::timed(secs, text));
        }
    }

    by_ms.into_values().collect()
}

/// "5" is tenths, "05" hundredths, "005" thousandths.
fn scale_fraction(digits: &str) -> f64 {
    let value: f64 = digits.parse().unwrap_or(0.0);
    value / 10f64.powi(digits.len() as i32)
}

fn parse_plain(content: &str) -> Vec<LyricLine> {
    if content.contains('\n') {
        return content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(LyricLine::untimed)
            .collect();
    }

    split_sentences(content)
        .into_iter()
        .map(LyricLine::untimed)
        .collect()
}

fn split_sentences(content: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = SENTENCE_END.contains(&c)
            && !chars.peek().is_some_and(|next| SENTENCE_END.contains(next));
        if at_boundary {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(parsed: &ParsedLyrics) -> Vec<f64> {
        parsed.lines.iter().filter_map(|l| l.time_secs).collect()
    }

    #[test]
    fn test_single_tag_with_fraction() {
        let parsed = ParsedLyrics::parse("[01:02.50] Hello");
        assert!(parsed.is_tagged());
        assert_eq!(parsed.lines, vec![LyricLine::timed(62.5, "Hello")]);
    }

    #[test]
    fn test_fraction_scaled_by_digit_count() {
        let parsed = ParsedLyrics::parse("[00:01.5]a\n[00:02.05]b\n[00:03.005]c\n[00:04]d");
        let t = times(&parsed);
        assert!((t[0] - 1.5).abs() < 1e-9);
        assert!((t[1] - 2.05).abs() < 1e-9);
        assert!((t[2] - 3.005).abs() < 1e-9);
        assert!((t[3] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_digit_minutes() {
        let parsed = ParsedLyrics::parse("[1:05]x");
        assert_eq!(times(&parsed), vec![65.0]);
    }

    #[test]
    fn test_multiple_tags_on_one_line() {
        let parsed = ParsedLyrics::parse("[00:05][00:10] Chorus");
        assert_eq!(
            parsed.lines,
            vec![LyricLine::timed(5.0, "Chorus"), LyricLine::timed(10.0, "Chorus")]
        );
    }

    #[test]
    fn test_tags_anywhere_are_stripped() {
        let parsed = ParsedLyrics::parse("Intro [00:03.00] line [00:07]");
        assert_eq!(parsed.lines.len(), 2);
        assert!(parsed.lines.iter().all(|l| l.text == "Intro  line"));
    }

    #[test]
    fn test_tag_only_lines_skipped() {
        let parsed = ParsedLyrics::parse("[00:01.00]\n[00:02.00]   \n[00:03.00]real");
        assert_eq!(parsed.lines, vec![LyricLine::timed(3.0, "real")]);
    }

    #[test]
    fn test_metadata_and_untagged_lines_dropped_in_tagged_mode() {
        let parsed = ParsedLyrics::parse("[ar:Someone]\nno tag here\n[00:01]one");
        assert_eq!(parsed.lines, vec![LyricLine::timed(1.0, "one")]);
    }

    #[test]
    fn test_sorted_and_deduplicated_first_seen_wins() {
        let parsed = ParsedLyrics::parse("[00:20]late\n[00:10]first\n[00:10.000]second\n[00:15]mid");
        assert_eq!(times(&parsed), vec![10.0, 15.0, 20.0]);
        assert_eq!(parsed.lines[0].text, "first");
    }

    #[test]
    fn test_output_strictly_increasing() {
        let input = "[00:03]c\n[00:01]a\n[00:02]b\n[00:01]dup\n[00:02.001]b2";
        let t = times(&ParsedLyrics::parse(input));
        assert!(t.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_malformed_tags_fall_back_to_plain() {
        let parsed = ParsedLyrics::parse("[123:45] nope\n[00:1] nope");
        assert_eq!(parsed.mode, LyricsMode::Plain);
        assert_eq!(parsed.len(), 2);
        assert!(parsed.lines.iter().all(|l| l.time_secs.is_none()));
    }

    #[test]
    fn test_plain_lines() {
        let parsed = ParsedLyrics::parse("line one\n\n  line two  \r\n");
        assert_eq!(
            parsed.lines,
            vec![LyricLine::untimed("line one"), LyricLine::untimed("line two")]
        );
    }

    #[test]
    fn test_plain_single_paragraph_splits_on_sentences() {
        let parsed = ParsedLyrics::parse("Hello there. How are you?! 我很好。");
        let texts: Vec<&str> = parsed.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello there.", "How are you?!", "我很好。"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(ParsedLyrics::parse("").is_empty());
        assert!(ParsedLyrics::parse("   \n\t\n").is_empty());
    }
}
