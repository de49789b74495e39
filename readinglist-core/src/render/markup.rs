//! Listing markup generation
//!
//! Builds the listing fragment event by event so that escaping stays
//! explicit: titles are written as text events (escaped), stored body
//! markup is the one deliberate raw write.

use crate::resolver::ResolvedImage;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Pass-through attributes for the listing container element
///
/// Supplied by the external layout system; merged onto the container in
/// map order so that identical inputs produce identical markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrapperAttributes(BTreeMap<String, String>);

impl WrapperAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WrapperAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One entry's share of the rendered listing
///
/// Ephemeral: produced fresh on every render, joined into markup at the
/// end, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFragment {
    /// Entry title, written escaped
    pub title: String,

    /// Resolved medium-size image, when the placement shows images and the
    /// entry has one
    pub image: Option<ResolvedImage>,

    /// Raw body markup, when the placement shows content
    pub body: Option<String>,
}

impl EntryFragment {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image: None,
            body: None,
        }
    }
}

/// Render the listing container with one section per fragment
pub fn render_listing(
    wrapper: &WrapperAttributes,
    fragments: &[EntryFragment],
) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    // Container element with the pass-through wrapper attributes
    let mut container = BytesStart::new("div");
    for (name, value) in wrapper.iter() {
        container.push_attribute((name, value));
    }
    writer.write_event(Event::Start(container))?;

    for fragment in fragments {
        write_fragment(&mut writer, fragment)?;
    }

    writer.write_event(Event::End(BytesEnd::new("div")))?;

    let result = writer.into_inner().into_inner();
    Ok(String::from_utf8(result).unwrap_or_default())
}

/// Write one entry section
fn write_fragment<W: std::io::Write>(
    writer: &mut Writer<W>,
    fragment: &EntryFragment,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("div")))?;

    // Heading is always present; the title is escaped as text content
    writer.write_event(Event::Start(BytesStart::new("h2")))?;
    writer.write_event(Event::Text(BytesText::new(&fragment.title)))?;
    writer.write_event(Event::End(BytesEnd::new("h2")))?;

    if let Some(image) = &fragment.image {
        write_image(writer, image)?;
    }

    if let Some(body) = &fragment.body {
        // Stored rich text markup, passed through unescaped
        writer.write_event(Event::Text(BytesText::from_escaped(body.as_str())))?;
    }

    writer.write_event(Event::End(BytesEnd::new("div")))?;
    Ok(())
}

/// Write an image element
fn write_image<W: std::io::Write>(
    writer: &mut Writer<W>,
    image: &ResolvedImage,
) -> Result<(), quick_xml::Error> {
    let width = image.width.map(|w| w.to_string());
    let height = image.height.map(|h| h.to_string());

    let mut elem = BytesStart::new("img");
    elem.push_attribute(("src", image.url.as_str()));
    if let Some(width) = width.as_deref() {
        elem.push_attribute(("width", width));
    }
    if let Some(height) = height.as_deref() {
        elem.push_attribute(("height", height));
    }
    elem.push_attribute(("alt", image.alt.as_deref().unwrap_or_default()));
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_is_just_the_container() {
        let output = render_listing(&WrapperAttributes::new(), &[]).unwrap();
        assert_eq!(output, "<div></div>");
    }

    #[test]
    fn test_wrapper_attributes_are_merged_in_order() {
        let wrapper: WrapperAttributes =
            [("class", "reading-list"), ("data-align", "wide")].into_iter().collect();
        let output = render_listing(&wrapper, &[]).unwrap();
        assert_eq!(output, r#"<div class="reading-list" data-align="wide"></div>"#);
    }

    #[test]
    fn test_title_is_escaped() {
        let fragment = EntryFragment::new("War & <Peace>");
        let output = render_listing(&WrapperAttributes::new(), &[fragment]).unwrap();
        assert!(output.contains("<h2>War &amp; &lt;Peace&gt;</h2>"));
    }

    #[test]
    fn test_body_markup_passes_through_raw() {
        let mut fragment = EntryFragment::new("Dune");
        fragment.body = Some("<p>He who controls the spice.</p>".to_string());
        let output = render_listing(&WrapperAttributes::new(), &[fragment]).unwrap();
        assert!(output.contains("<p>He who controls the spice.</p>"));
    }

    #[test]
    fn test_image_element_attributes() {
        let mut fragment = EntryFragment::new("Foundation");
        fragment.image = Some(
            ResolvedImage::new("https://media.example/img1-300x200.jpg")
                .with_dimensions(300, 200)
                .with_alt("Cover"),
        );
        let output = render_listing(&WrapperAttributes::new(), &[fragment]).unwrap();
        assert!(output.contains(
            r#"<img src="https://media.example/img1-300x200.jpg" width="300" height="200" alt="Cover"/>"#
        ));
    }
}
