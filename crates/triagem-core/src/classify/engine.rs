use crate::catalog::SectorCatalog;
use crate::classify::outcome::{Classification, ClassificationResult};
use crate::model::PageRecord;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// A sector header line: "SETOR" or "UNIDADE/SETOR", an optional separator,
/// then the sector name up to end of line. The keyword must be a whole word.
/// Matched against uppercased text.
static SECTOR_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:UNIDADE/SETOR|SETOR)\b[ \t]*[:\-.–—]?[ \t]*([^\r\n]*)").unwrap()
});

/// Context carried from page to page within one `classify` call.
#[derive(Debug, Default)]
struct RunningState {
    last_valid_classification: Option<String>,
    last_valid_stamp: Option<String>,
}

/// Which heuristic decided a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    HeaderMatch,
    UnknownHeader,
    Retraction,
    Continuation,
    Discard,
}

#[derive(Debug)]
struct PageDecision {
    classification: Classification,
    stamp: Option<String>,
    rule: Rule,
}

/// Classify a sequence of pages against a sector catalog.
///
/// Returns exactly one result per page, in input order. Pages are processed
/// strictly in sequence: a page's outcome depends on the sector context left
/// by the pages before it, and a retraction page rewrites the most recent
/// still-valid result to "descartada".
pub fn classify(pages: &[PageRecord], catalog: &SectorCatalog) -> Vec<ClassificationResult> {
    let mut state = RunningState::default();
    let mut results: Vec<ClassificationResult> = Vec::with_capacity(pages.len());

    for page in pages {
        let decision = classify_page(page, catalog, &mut state);

        debug!(
            page = page.page_number,
            filename = %page.filename,
            rule = ?decision.rule,
            classification = %decision.classification,
            stamp = decision.stamp.as_deref().unwrap_or("-"),
            "page classified"
        );

        if decision.rule == Rule::Retraction {
            discard_last_valid(&mut results);
        }

        results.push(ClassificationResult::for_page(
            page,
            decision.classification,
            decision.stamp,
        ));
    }

    results
}

fn classify_page(
    page: &PageRecord,
    catalog: &SectorCatalog,
    state: &mut RunningState,
) -> PageDecision {
    let upper = page.text.to_uppercase();

    if let Some(sector) = extract_sector(&upper) {
        return match catalog.match_sector(&sector) {
            Some(entry) => {
                state.last_valid_classification = Some(entry.stamp.clone());
                state.last_valid_stamp = Some(entry.stamp.clone());
                PageDecision {
                    classification: Classification::Sector(entry.stamp.clone()),
                    stamp: Some(entry.stamp.clone()),
                    rule: Rule::HeaderMatch,
                }
            }
            // Unrecognised header: the previous context stays in force.
            None => PageDecision {
                classification: Classification::PatternNotFound,
                stamp: None,
                rule: Rule::UnknownHeader,
            },
        };
    }

    if catalog.is_retraction(&upper) {
        return PageDecision {
            classification: Classification::Retracted,
            stamp: state.last_valid_stamp.clone(),
            rule: Rule::Retraction,
        };
    }

    if catalog.is_continuation(&page.text) {
        let classification = match &state.last_valid_classification {
            Some(stamp) => Classification::Sector(stamp.clone()),
            None => Classification::PatternNotFound,
        };
        return PageDecision {
            classification,
            stamp: state.last_valid_stamp.clone(),
            rule: Rule::Continuation,
        };
    }

    PageDecision {
        classification: Classification::Discarded,
        stamp: state.last_valid_stamp.clone(),
        rule: Rule::Discard,
    }
}

/// Mark the most recent result that is neither retracted nor discarded as
/// discarded. Its stamp is kept.
fn discard_last_valid(results: &mut [ClassificationResult]) {
    if let Some(prev) = results
        .iter_mut()
        .rev()
        .find(|r| r.classification.is_retractable())
    {
        debug!(
            page = prev.page_number,
            was = %prev.classification,
            "superseded by retraction"
        );
        prev.classification = Classification::Discarded;
    }
}

/// Extract the sector name from the first header line in uppercased text.
///
/// Header lines with nothing after the keyword are skipped.
pub fn extract_sector(upper_text: &str) -> Option<String> {
    SECTOR_HEADER.captures_iter(upper_text).find_map(|caps| {
        let sector = caps
            .get(1)?
            .as_str()
            .trim_matches(|c: char| {
                c.is_whitespace() || matches!(c, ':' | '-' | '–' | '—' | '•' | '·' | '*')
            });
        if sector.is_empty() {
            None
        } else {
            Some(sector.to_string())
        }
    })
}
