// Colored terminal output for ranked results.
//
// Each result kind keeps its classic one-line format ("word : count",
// "score : phrase", ...). Formatting is separate from printing so the line
// formats can be tested without a terminal.

use colored::Colorize;

use super::truncate_chars;
use crate::analysis::frequency::FrequencyEntry;
use crate::analysis::skills::SkillEntry;
use crate::analysis::{RankedResult, ScoredTerm};
use crate::sources::DocumentSet;

/// Plain text lines for a result, in display order.
pub fn format_lines(result: &RankedResult) -> Vec<String> {
    match result {
        RankedResult::Frequencies(entries) => entries.iter().map(frequency_line).collect(),
        RankedResult::Keywords(entries) => entries.iter().map(keyword_line).collect(),
        RankedResult::Skills(entries) => entries.iter().map(skill_line).collect(),
        RankedResult::Distinctive(entries) => entries
            .iter()
            .map(|e| format!("{:.4} : {}", e.score, e.term))
            .collect(),
    }
}

fn frequency_line(entry: &FrequencyEntry) -> String {
    match entry.coverage {
        Some(coverage) => format!(
            "{} : {} : {:.2}%",
            entry.term,
            entry.count,
            coverage * 100.0
        ),
        None => format!("{} : {}", entry.term, entry.count),
    }
}

fn keyword_line(entry: &ScoredTerm) -> String {
    format!("{:.1} : {}", entry.score, entry.term)
}

fn skill_line(entry: &SkillEntry) -> String {
    format!("{} : {} : {}", entry.skill, entry.local_count, entry.popularity)
}

/// Display a ranked result in the terminal.
pub fn display_result(result: &RankedResult) {
    if result.is_empty() {
        println!("{}", "No results — nothing survived cleaning.".dimmed());
        return;
    }

    let (title, columns) = match result {
        RankedResult::Frequencies(entries) if entries.iter().any(|e| e.coverage.is_some()) => {
            ("Word Counts", "word : count : coverage")
        }
        RankedResult::Frequencies(_) => ("Word Counts", "word : count"),
        RankedResult::Keywords(_) => ("Keywords", "score : phrase"),
        RankedResult::Skills(_) => ("Skills", "skill : local count : popularity"),
        RankedResult::Distinctive(_) => ("Distinctive Terms", "tf-idf : term"),
    };

    println!(
        "\n{}",
        format!("=== {} ({} entries) ===", title, result.len()).bold()
    );
    println!("  {}", columns.dimmed());
    println!("  {}", "-".repeat(40).dimmed());

    for (i, line) in format_lines(result).iter().enumerate() {
        let rank = format!("{:>4}.", i + 1);
        println!("  {} {}", rank.dimmed(), line);
    }
    println!();
}

/// One line per fetched document: source, label and size.
pub fn display_document_summary(docs: &DocumentSet) {
    println!(
        "{}",
        format!("Read {} document(s)", docs.len()).bold()
    );
    for doc in docs.iter() {
        let words = doc.text.split_whitespace().count();
        let label = truncate_chars(&doc.label, 60);
        if words == 0 {
            println!("  {} {} {}", "~".yellow(), label, "(empty)".dimmed());
        } else {
            println!(
                "  {} {} {}",
                "-".dimmed(),
                label,
                format!("({words} words, {})", doc.source).dimmed()
            );
        }
    }
}
