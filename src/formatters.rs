use crate::constants::UNIT_SUFFIX_LEN;

/// Turns a raw wttr.in `%t` body into the metric value.
///
/// The service answers with the temperature followed by a fixed-width unit
/// suffix, so the last [`UNIT_SUFFIX_LEN`] bytes are dropped. Bodies shorter
/// than the suffix yield an empty value. If the service ever changes its
/// suffix, the cut may split a multi-byte character, which then shows up as
/// U+FFFD in the value.
pub fn strip_unit_suffix(body: &[u8]) -> String {
    let end = body.len().saturating_sub(UNIT_SUFFIX_LEN);
    String::from_utf8_lossy(&body[..end]).into_owned()
}
