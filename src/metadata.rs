//! Share metadata and its resolution from element data attributes.
//!
//! Every field is resolved independently through a three-level chain:
//! the button's own `data-*` attribute, then the container's, then the
//! page-wide default. Resolved values are percent-encoded before they reach
//! a builder, so builders only ever concatenate.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left untouched by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single URL component.
///
/// Matches ECMAScript `encodeURIComponent`: only ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )` pass through unchanged.
///
/// # Examples
///
/// ```
/// use shareon::encode_component;
///
/// assert_eq!(encode_component("Hello World"), "Hello%20World");
/// assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
/// ```
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// One of the six configurable share fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaField {
    Url,
    Title,
    Media,
    Text,
    Via,
    FbAppId,
}

impl MetaField {
    /// All fields, in resolution order.
    pub const ALL: [MetaField; 6] = [
        MetaField::Url,
        MetaField::Title,
        MetaField::Media,
        MetaField::Text,
        MetaField::Via,
        MetaField::FbAppId,
    ];

    /// The data attribute that configures this field.
    pub fn attribute(self) -> &'static str {
        match self {
            MetaField::Url => "data-url",
            MetaField::Title => "data-title",
            MetaField::Media => "data-media",
            MetaField::Text => "data-text",
            MetaField::Via => "data-via",
            MetaField::FbAppId => "data-fb-app-id",
        }
    }
}

/// Document-level defaults used when neither button nor container set a field.
///
/// Values are raw; they are encoded during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDefaults {
    /// Current page location.
    pub url: String,
    /// Document title.
    pub title: String,
}

impl PageDefaults {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Default for a field. Only `url` and `title` have page-level values.
    pub fn get(&self, field: MetaField) -> &str {
        match field {
            MetaField::Url => &self.url,
            MetaField::Title => &self.title,
            _ => "",
        }
    }
}

/// Percent-encoded metadata handed to a URL builder.
///
/// An empty field means "absent"; builders omit the optional query segment
/// for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareMetadata {
    pub url: String,
    pub title: String,
    pub media: String,
    pub text: String,
    pub via: String,
    pub fb_app_id: String,
}

impl ShareMetadata {
    /// Build metadata from raw values, encoding each one.
    pub fn encoded(url: &str, title: &str) -> Self {
        Self {
            url: encode_component(url),
            title: encode_component(title),
            ..Default::default()
        }
    }

    /// Set a raw optional value, encoding it.
    pub fn with(mut self, field: MetaField, raw: &str) -> Self {
        *self.field_mut(field) = encode_component(raw);
        self
    }

    /// Resolve all fields through the child → container → page chain.
    ///
    /// `child` and `container` look up a data attribute by name. A present
    /// but empty attribute falls through to the next level.
    pub fn resolve<C, P>(child: C, container: P, page: &PageDefaults) -> Self
    where
        C: Fn(&str) -> Option<String>,
        P: Fn(&str) -> Option<String>,
    {
        let mut meta = ShareMetadata::default();
        for field in MetaField::ALL {
            let attr = field.attribute();
            let raw = child(attr)
                .filter(|v| !v.is_empty())
                .or_else(|| container(attr).filter(|v| !v.is_empty()));
            let value = match raw {
                Some(v) => encode_component(&v),
                None => encode_component(page.get(field)),
            };
            *meta.field_mut(field) = value;
        }
        meta
    }

    pub fn field(&self, field: MetaField) -> &str {
        match field {
            MetaField::Url => &self.url,
            MetaField::Title => &self.title,
            MetaField::Media => &self.media,
            MetaField::Text => &self.text,
            MetaField::Via => &self.via,
            MetaField::FbAppId => &self.fb_app_id,
        }
    }

    fn field_mut(&mut self, field: MetaField) -> &mut String {
        match field {
            MetaField::Url => &mut self.url,
            MetaField::Title => &mut self.title,
            MetaField::Media => &mut self.media,
            MetaField::Text => &mut self.text,
            MetaField::Via => &mut self.via,
            MetaField::FbAppId => &mut self.fb_app_id,
        }
    }
}
