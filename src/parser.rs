//! Turns raw completion text into an ordered list of unique names

use std::collections::HashSet;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use log::{debug, trace};

/// Leading list markers: bullets, "1.", "2)", "(3)", "#4", "5 -"
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^(?:[-*•·+>–—]+\s*|\(?\d{1,3}[.):\]]\s*|\d{1,3}\s+[-–—:]\s*|#\d{1,3}\s*)"
  ).expect("list marker pattern is valid")
});

/// Markdown headings ("## Brand Names")
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^#{1,6}\s").expect("heading pattern is valid")
});

/// A sentence end followed by more words
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[.!?]\s+\S").expect("sentence pattern is valid")
});

/// Separators after which a model tends to explain a name
const DESCRIPTION_SEPARATORS: [&str; 5] = [" - ", " – ", " — ", ": ", " ("];

const WRAPPING: &[char] = &[
  '"', '\'', '`', '“', '”', '‘', '’', '«', '»', '*', '_'
];

const TRAILING: &[char] = &['.', ',', ';', ':'];

/// Thresholds for telling a name from commentary.
/// Tunable; the rest of the parser does not depend on their values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameHeuristics
{   /// Longest accepted candidate, in characters
    pub max_chars: usize
  , /// Most whitespace-separated words in a candidate
    pub max_words: usize
}

impl Default for NameHeuristics
{   fn default() -> Self
    {   NameHeuristics
        {   max_chars: 40
          , max_words: 4
        }
    }
}

impl NameHeuristics
{   /// Whether a cleaned line reads like a name rather than prose
    pub fn is_probable_name(&self, text: &str) -> bool
    {   if text.is_empty() || !text.chars().any(char::is_alphabetic)
        {   return false;
        }
        if text.chars().count() > self.max_chars
        {   return false;
        }
        let words = text.split_whitespace().count();
        if words > self.max_words
        {   return false;
        }
        if SENTENCE_BREAK.is_match(text) || text.ends_with(['!', '?'])
        {   return false;
        }
        if words < 2
        {   return true;
        }
        // Multi-word brands are title-cased; lowercase runs are commentary
        let starts_lower = |w: &str| {
          w.chars().next().map_or(false, char::is_lowercase)
        };
        let first_lower = text.split_whitespace().next().map_or(false, starts_lower);
        let tail_lower = text.split_whitespace().skip(1).all(starts_lower);
        !(first_lower || tail_lower)
    }
}

/// Ordered, case-insensitively unique candidate names
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidateList(Vec<String>);

impl CandidateList
{   pub fn names(&self) -> &[String]
    {   &self.0
    }

    pub fn len(&self) -> usize
    {   self.0.len()
    }

    pub fn is_empty(&self) -> bool
    {   self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String>
    {   self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String>
    {   self.0
    }

    /// One name per line
    pub fn to_lines(&self) -> String
    {   self.0.join("\n")
    }
}

impl<'a> IntoIterator for &'a CandidateList
{   type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter
    {   self.0.iter()
    }
}

/// Strip markers, wrapping and trailing descriptions until stable.
/// Returns None for headings and intro lines ("Here are some names:"),
/// including emphasized ones ("**Tech-Inspired Names:**").
pub fn clean_line(line: &str) -> Option<String>
{   let mut current = line.trim().to_string();
    loop
    {   if HEADING.is_match(&current) || current.ends_with(':')
        {   return None;
        }
        let mut next = LIST_MARKER.replace(&current, "").into_owned();
        next = next.trim().trim_matches(WRAPPING).trim().to_string();
        if HEADING.is_match(&next) || next.ends_with(':')
        {   return None;
        }
        if let Some(cut) = DESCRIPTION_SEPARATORS
          .iter()
          .filter_map(|sep| next.find(sep))
          .min()
        {   next.truncate(cut);
        }
        next = next
          .trim()
          .trim_end_matches(TRAILING)
          .trim()
          .trim_matches(WRAPPING)
          .trim()
          .to_string();
        if next == current
        {   break;
        }
        current = next;
    }
    if current.is_empty() { None } else { Some(current) }
}

/// Completion text to candidate list
#[derive(Debug, Clone, Default)]
pub struct ResponseParser
{   heuristics: NameHeuristics
}

impl ResponseParser
{   pub fn new(heuristics: NameHeuristics) -> Self
    {   ResponseParser { heuristics }
    }

    /// Keep at most `requested_count` names in first-seen order.
    /// Fewer names than requested is fine; none at all is an error.
    pub fn parse(
      &self
    , raw: &str
    , requested_count: usize
    ) -> Result<CandidateList, crate::error::Error>
    {   let mut seen = HashSet::new();
        let mut names = Vec::new();
        let mut discarded = 0usize;

        for line in raw.lines()
        {   let Some(name) = clean_line(line) else { continue };
            if !self.heuristics.is_probable_name(&name)
            {   trace!("Discarding non-name line: {:?}", name);
                discarded += 1;
                continue;
            }
            if seen.insert(name.to_lowercase())
            {   names.push(name);
            } else
            {   trace!("Dropping duplicate: {:?}", name);
            }
        }

        let unique = names.len();
        names.truncate(requested_count);
        debug!(
          "Parsed {} unique names ({} discarded), keeping {}",
          unique, discarded, names.len()
        );

        if names.is_empty()
        {   return Err(crate::error::Error::EmptyResult);
        }
        Ok(CandidateList(names))
    }
}
