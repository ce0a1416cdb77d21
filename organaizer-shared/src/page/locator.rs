// SPDX-License-Identifier: GPL-3.0-only
use super::{Element, ElementId, Page, TextRange};

/// Insertion point inside the located element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Plain field: caret at `start`, selection `start..end`
    Offsets { start: usize, end: usize },
    /// Rich-text region: the active selection range
    Range(TextRange),
}

/// Where the next mutation lands.
///
/// Captured from the page in one step and consumed by value by exactly one
/// mutation. Focus changes invalidate it, so capture it before any await.
#[derive(Debug, PartialEq, Eq)]
pub struct TargetLocator {
    element: Option<ElementId>,
    position: Option<Position>,
}

impl TargetLocator {
    /// Inspect the focused element.
    ///
    /// Plain fields yield their selection offsets, rich-text regions their
    /// selection range if one exists. Anything else yields no target.
    #[must_use]
    pub fn locate(page: &Page) -> Self {
        let Some(id) = page.focused() else {
            return Self::none();
        };

        match page.element(id) {
            Some(Element::PlainField(field)) => Self {
                element: Some(id),
                position: Some(Position::Offsets {
                    start: field.selection_start,
                    end: field.selection_end,
                }),
            },
            Some(Element::RichText(rich)) => Self {
                element: Some(id),
                position: rich.selection.map(Position::Range),
            },
            Some(Element::Other { .. }) | None => Self::none(),
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self {
            element: None,
            position: None,
        }
    }

    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    #[must_use]
    pub fn has_target(&self) -> bool {
        self.element.is_some()
    }
}
