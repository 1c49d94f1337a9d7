//! Interactive topic selection.
//!
//! One line of input picks the query:
//! - blank input picks a topic at random
//! - a number from 1 to the number of topics picks that topic
//! - anything else is used as a free-text query

use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, BufRead, Write};

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Pick a loaded topic at random
    Random,
    /// Zero-based index into the loaded topics
    Index(usize),
    /// Query text typed by the user
    FreeText(String),
}

/// Interpret one line of input against a list of `topic_count` topics.
pub fn parse_selection(input: &str, topic_count: usize) -> Selection {
    let input = input.trim();
    if input.is_empty() {
        return Selection::Random;
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=topic_count).contains(&n) => Selection::Index(n - 1),
        _ => Selection::FreeText(input.to_string()),
    }
}

impl Selection {
    /// Turn the selection into a query string.
    ///
    /// Returns `None` only for a random pick from an empty list.
    pub fn resolve<R: Rng + ?Sized>(self, topics: &[String], rng: &mut R) -> Option<String> {
        match self {
            Selection::Random => topics.choose(rng).cloned(),
            Selection::Index(idx) => topics.get(idx).cloned(),
            Selection::FreeText(text) => Some(text),
        }
    }
}

/// Write the numbered topic list to `output`.
pub fn write_topic_list<W: Write>(topics: &[String], output: &mut W) -> io::Result<()> {
    writeln!(output, "Available topics:")?;
    let width = topics.len().to_string().len();
    for (i, topic) in topics.iter().enumerate() {
        writeln!(output, "  {:>width$}. {}", i + 1, topic, width = width)?;
    }
    Ok(())
}

/// Show the topics, read one line and resolve it to a query.
pub fn prompt_topic<I, W, R>(
    topics: &[String],
    input: &mut I,
    output: &mut W,
    rng: &mut R,
) -> io::Result<Option<String>>
where
    I: BufRead,
    W: Write,
    R: Rng + ?Sized,
{
    write_topic_list(topics, output)?;
    write!(
        output,
        "Choose a number, type a topic, or press Enter for a random pick: "
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let selection = parse_selection(&line, topics.len());
    tracing::debug!(?selection, "Topic selection");
    Ok(selection.resolve(topics, rng))
}
