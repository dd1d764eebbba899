use indexmap::IndexMap;

use crate::validation::{HighlightGroup, RangeMarker, TextRange};

/// Named highlight groups over the rows of the choices editor.
#[derive(Debug, Clone)]
pub struct HighlightRegistry {
    enabled: bool,
    groups: IndexMap<HighlightGroup, Vec<TextRange>>,
}

impl HighlightRegistry {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            groups: IndexMap::new(),
        }
    }

    pub fn ranges(&self, group: HighlightGroup) -> &[TextRange] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Group painted at a character of a row. Duplicates win over length.
    pub fn group_at(&self, row: usize, column: usize) -> Option<HighlightGroup> {
        [HighlightGroup::Duplicate, HighlightGroup::TooLong]
            .into_iter()
            .find(|group| {
                self.ranges(*group)
                    .iter()
                    .any(|range| range.contains(row, column))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }
}

impl RangeMarker for HighlightRegistry {
    fn is_available(&self) -> bool {
        self.enabled
    }

    fn clear(&mut self) {
        self.groups.clear();
    }

    fn mark(&mut self, group: HighlightGroup, ranges: &[TextRange]) {
        self.groups.insert(group, ranges.to_vec());
    }
}

/// Places fragment-relative ranges onto editor rows.
///
/// Validation sees normalized fragments, so offsets are shifted past the
/// leading whitespace of the row they came from.
pub(crate) struct RowMarker<'a, M: RangeMarker> {
    pub(crate) inner: &'a mut M,
    pub(crate) rows: &'a [usize],
    pub(crate) indents: &'a [usize],
}

impl<M: RangeMarker> RangeMarker for RowMarker<'_, M> {
    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn mark(&mut self, group: HighlightGroup, ranges: &[TextRange]) {
        let placed = ranges
            .iter()
            .filter_map(|range| {
                let row = *self.rows.get(range.fragment)?;
                let indent = self.indents.get(range.fragment).copied().unwrap_or(0);
                Some(TextRange {
                    fragment: row,
                    start: range.start + indent,
                    end: range.end + indent,
                })
            })
            .collect::<Vec<_>>();
        self.inner.mark(group, &placed);
    }
}
