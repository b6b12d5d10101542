//! Shared XML attribute parsing utilities for the XLSX codec.
//!
//! All functions handle namespace-prefixed attributes, entity unescaping and
//! UTF-8 conversion; a malformed attribute reads as missing.

use quick_xml::events::BytesStart;

/// Extract a string attribute value by its full (possibly prefixed) key.
///
/// Returns `None` if the attribute is missing, not valid UTF-8, or holds a
/// broken entity reference.
pub fn attr_string(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return attr.unescape_value().ok().map(std::borrow::Cow::into_owned);
        }
    }
    None
}

/// Extract a string attribute by local name, ignoring any namespace prefix.
///
/// `r:id`, `id` and `rel:id` all match `b"id"`.
pub fn attr_string_local(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == key {
            return attr.unescape_value().ok().map(std::borrow::Cow::into_owned);
        }
    }
    None
}

/// Extract a `u32` attribute value by key.
pub fn attr_u32(e: &BytesStart, key: &[u8]) -> Option<u32> {
    attr_string(e, key).and_then(|s| s.trim().parse().ok())
}

/// Extract an `f64` attribute value by key.
pub fn attr_f64(e: &BytesStart, key: &[u8]) -> Option<f64> {
    attr_string(e, key).and_then(|s| s.trim().parse().ok())
}

/// Extract the `val` attribute as a string. Very common in XLSX XML.
pub fn attr_val(e: &BytesStart) -> Option<String> {
    attr_string(e, b"val")
}

/// Read an on/off font toggle such as `<b/>`, `<i val="0"/>` or `<u val="none"/>`.
///
/// A bare element means on.
pub fn font_toggle(e: &BytesStart) -> bool {
    match attr_val(e) {
        None => true,
        Some(v) => !matches!(v.as_str(), "0" | "false" | "none"),
    }
}
