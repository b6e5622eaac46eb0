//! MIME body structure, as produced by `FETCH (BODY)` / `FETCH (BODYSTRUCTURE)`.
//!
//! The four shapes below mirror the four productions of `body` in RFC 3501 §9 (`body-type-text`,
//! `body-type-msg`, `body-type-basic`, `body-type-mpart`). [`Body`] is self-referential through
//! [`MessageBody::body`] and [`MultipartBody::parts`]; there are no cycles, only finite trees.

use std::collections::BTreeMap;

use crate::envelope::Envelope;

/// A single MIME body, in any of its four shapes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Body {
    Text(TextBody),
    Message(MessageBody),
    Basic(BasicBody),
    Multipart(MultipartBody),
}

/// Fields common to every single-part body (`body-fields` in the ABNF).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyFields {
    /// Body parameters (e.g. `charset`), keyed on their lowercased parameter name.
    pub params: BTreeMap<String, String>,
    pub id: Option<String>,
    pub description: Option<String>,
    /// Content-Transfer-Encoding, lowercased (e.g. `"base64"`, `"7bit"`).
    pub encoding: String,
    /// Size of the body in octets.
    pub size: u64,
}

/// The single-part extension fields shared by `text`, `message/rfc822`, and basic bodies.
///
/// Filled strictly in order (md5, disposition, lang, location, extension); a missing trailing
/// field defaults all fields after it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SinglePartExtension {
    pub md5: Option<Vec<u8>>,
    pub disposition: Option<Disposition>,
    pub language: Option<Vec<String>>,
    pub location: Option<Vec<u8>>,
    pub extension: Vec<BodyExtension>,
}

/// The multipart extension fields (`multipart-extension` in the ABNF).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultipartExtension {
    pub params: BTreeMap<String, String>,
    pub disposition: Option<Disposition>,
    pub language: Option<Vec<String>>,
    pub location: Option<Vec<u8>>,
    pub extension: Vec<BodyExtension>,
}

/// `body-fld-dsp`: a Content-Disposition type plus its parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Disposition {
    /// Lowercased disposition type, e.g. `"attachment"`.
    pub disposition_type: String,
    pub params: BTreeMap<String, String>,
}

/// A single `body-extension` item: further, forward-compatible extension data that this engine
/// does not interpret beyond its shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyExtension {
    List(Vec<BodyExtension>),
    Number(u64),
    NString(Option<Vec<u8>>),
}

/// `body-type-text`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextBody {
    /// Always `"text"`.
    pub media_type: String,
    pub media_subtype: String,
    pub fields: BodyFields,
    pub lines: u64,
    pub extension: SinglePartExtension,
}

/// `body-type-msg` (a `message/rfc822` part).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageBody {
    /// Always `"message"`.
    pub media_type: String,
    /// Always `"rfc822"`.
    pub media_subtype: String,
    pub fields: BodyFields,
    pub envelope: Envelope,
    pub body: Box<Body>,
    pub lines: u64,
    pub extension: SinglePartExtension,
}

/// `body-type-basic`: any single-part body that is neither `text/*` nor `message/rfc822`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicBody {
    pub media_type: String,
    pub media_subtype: String,
    pub fields: BodyFields,
    pub extension: SinglePartExtension,
}

/// `body-type-mpart`: a `multipart/*` body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultipartBody {
    /// Always `"multipart"`.
    pub media_type: String,
    pub media_subtype: String,
    pub parts: Vec<Body>,
    pub extension: MultipartExtension,
}
