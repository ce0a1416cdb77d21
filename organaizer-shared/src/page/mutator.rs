// SPDX-License-Identifier: GPL-3.0-only
//! Text and image mutations at a captured [`TargetLocator`].

use log::debug;

use super::{
    DomEvent, Element, ElementId, Node, Page, PlainField, Position, RichText, TargetLocator,
    TextRange,
};
use crate::models::image::ImageSource;
use crate::utils::text::{char_len, splice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("No active text field found")]
    NoTarget,

    #[error("The focused region has no cursor")]
    NoInsertionPoint,

    #[error("The focused element cannot host an image")]
    UnsupportedTarget,

    #[error("The focused element changed since the cursor was captured")]
    StaleTarget,
}

enum Target<'a> {
    Plain(&'a mut PlainField, usize, usize),
    Rich(&'a mut RichText, TextRange),
}

fn resolve(
    page: &mut Page,
    locator: TargetLocator,
) -> Result<(ElementId, Target<'_>), MutationError> {
    let id = locator.element().ok_or(MutationError::NoTarget)?;
    let position = locator.position();

    match (page.element_mut(id), position) {
        (Some(Element::PlainField(field)), Some(Position::Offsets { start, end })) => {
            Ok((id, Target::Plain(field, start, end)))
        }
        (Some(Element::RichText(rich)), Some(Position::Range(range))) => {
            Ok((id, Target::Rich(rich, range)))
        }
        (Some(Element::RichText(_)), None) => Err(MutationError::NoInsertionPoint),
        _ => Err(MutationError::StaleTarget),
    }
}

/// Splice `text` in at the cursor.
///
/// Plain fields replace the selection, put the caret just past the inserted
/// text and emit a bubbling `input` event. Rich-text regions delete the range
/// contents, insert a text node and collapse the selection after it.
///
/// # Errors
///
/// Returns [`MutationError::NoTarget`] when nothing editable was focused;
/// the page is left untouched on any error.
pub fn insert_text_at_cursor(
    page: &mut Page,
    locator: TargetLocator,
    text: &str,
) -> Result<(), MutationError> {
    let (id, target) = resolve(page, locator)?;
    match target {
        Target::Plain(field, start, end) => {
            field.value = splice(&field.value, start, end, text);
            let caret = start + char_len(text);
            field.set_selection(caret, caret);
            page.emit(DomEvent::Input {
                target: id,
                bubbles: true,
            });
        }
        Target::Rich(rich, range) => {
            rich.replace_range(&range, Node::Text(text.to_string()));
        }
    }
    debug!("Inserted {} characters", char_len(text));
    Ok(())
}

/// Replace the selection with `new_text`.
///
/// Plain fields re-select exactly the replacement so a further replace is
/// well defined. Rich-text regions collapse after the inserted node.
///
/// # Errors
///
/// Returns [`MutationError::NoTarget`] when nothing editable was focused.
pub fn replace_selected_text(
    page: &mut Page,
    locator: TargetLocator,
    new_text: &str,
) -> Result<(), MutationError> {
    let (id, target) = resolve(page, locator)?;
    match target {
        Target::Plain(field, start, end) => {
            field.value = splice(&field.value, start, end, new_text);
            field.set_selection(start, start + char_len(new_text));
            page.emit(DomEvent::Input {
                target: id,
                bubbles: true,
            });
        }
        Target::Rich(rich, range) => {
            rich.replace_range(&range, Node::Text(new_text.to_string()));
        }
    }
    Ok(())
}

/// Insert an image node into a rich-text region.
///
/// # Errors
///
/// Plain fields cannot host an inline image, so anything other than a
/// rich-text region with a cursor is an error and the caller falls back to
/// the image modal.
pub fn insert_image_at_cursor(
    page: &mut Page,
    locator: TargetLocator,
    image: &ImageSource,
) -> Result<(), MutationError> {
    match resolve(page, locator)? {
        (_, Target::Rich(rich, range)) => {
            rich.replace_range(&range, Node::Image { src: image.to_src() });
            debug!("Inserted image {image}");
            Ok(())
        }
        (_, Target::Plain(..)) => Err(MutationError::UnsupportedTarget),
    }
}
