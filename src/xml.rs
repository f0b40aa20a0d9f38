//! Small helpers to walk the `roxmltree` documents returned by `login_sid.lua`.

use roxmltree::Node;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("element `{0}` not found")]
    ElementNotFound(&'static str),
    #[error("element `{0}` has no text")]
    NoText(&'static str),
}
pub type Result<T> = std::result::Result<T, Error>;

/// First direct child element of `node` named `tag`.
pub fn find_element<'a, 'b>(node: Node<'a, 'b>, tag: &'static str) -> Result<Node<'a, 'b>> {
    node.children()
        .find(|n| n.is_element() && n.has_tag_name(tag))
        .ok_or(Error::ElementNotFound(tag))
}

/// Trimmed text of the child element `tag`, which has to be present and non-empty.
pub fn element_text<'a>(node: Node<'a, '_>, tag: &'static str) -> Result<&'a str> {
    find_element(node, tag)?
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(Error::NoText(tag))
}
