//! Choice list validation: duplicate and over-length detection.
//!
//! The scan itself is pure. Painting the offending ranges goes through a
//! [`RangeMarker`], so the algorithm knows nothing about the surface that
//! displays the choices.

use indexmap::IndexMap;

use crate::domain::{MAX_CHOICE_LENGTH, ValidationState, normalize_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightGroup {
    TooLong,
    Duplicate,
}

impl HighlightGroup {
    pub fn name(self) -> &'static str {
        match self {
            HighlightGroup::TooLong => "too-long",
            HighlightGroup::Duplicate => "duplicate",
        }
    }
}

/// Character range inside one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub fragment: usize,
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn contains(&self, fragment: usize, offset: usize) -> bool {
        self.fragment == fragment && offset >= self.start && offset < self.end
    }
}

/// Surface capable of showing named groups of highlighted ranges.
pub trait RangeMarker {
    /// Hosts without highlighting return `false`; validation is then skipped.
    fn is_available(&self) -> bool {
        true
    }

    fn clear(&mut self);

    fn mark(&mut self, group: HighlightGroup, ranges: &[TextRange]);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceScan {
    pub too_long: Vec<TextRange>,
    pub duplicate: Vec<TextRange>,
}

/// Computes the too-long and duplicate ranges for the given fragments.
///
/// Blank fragments normalize to "" and count as duplicates of each other.
pub fn scan_choices<S: AsRef<str>>(fragments: &[S]) -> ChoiceScan {
    let normalized = fragments
        .iter()
        .map(|fragment| normalize_text(Some(fragment.as_ref())))
        .collect::<Vec<_>>();

    let mut occurrences: IndexMap<&str, usize> = IndexMap::new();
    for text in &normalized {
        *occurrences.entry(text.as_str()).or_default() += 1;
    }

    let mut scan = ChoiceScan::default();
    for (index, text) in normalized.iter().enumerate() {
        let length = text.chars().count();
        if length > MAX_CHOICE_LENGTH {
            scan.too_long.push(TextRange {
                fragment: index,
                start: MAX_CHOICE_LENGTH,
                end: length,
            });
        }
    }
    for (index, text) in normalized.iter().enumerate() {
        if occurrences.get(text.as_str()).copied().unwrap_or(0) > 1 {
            scan.duplicate.push(TextRange {
                fragment: index,
                start: 0,
                end: text.chars().count(),
            });
        }
    }
    scan
}

/// Re-validates the fragments, repaints the marker and returns the updated
/// flags. Only `has_too_long` and `has_duplicates` are touched.
pub fn highlight<M, S>(marker: &mut M, fragments: &[S], state: ValidationState) -> ValidationState
where
    M: RangeMarker + ?Sized,
    S: AsRef<str>,
{
    if !marker.is_available() {
        return state;
    }

    let scan = scan_choices(fragments);
    marker.clear();
    marker.mark(HighlightGroup::TooLong, &scan.too_long);
    marker.mark(HighlightGroup::Duplicate, &scan.duplicate);

    ValidationState {
        has_too_long: !scan.too_long.is_empty(),
        // Two fragments sharing text already yield two ranges.
        has_duplicates: scan.duplicate.len() > 1,
        ..state
    }
}
