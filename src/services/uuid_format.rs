use thiserror::Error;

pub(crate) const MIN_UUID_LEN: usize = 32;
pub(crate) const MAX_UUID_LEN: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid uuid format: {0:?}")]
pub(crate) struct UuidFormatError(pub(crate) String);

/// Accepts 32..=36 characters made of hex digits, with `-` allowed as a separator.
pub(crate) fn validate_uuid(value: &str) -> Result<(), UuidFormatError> {
    let len = value.chars().count();
    let length_ok = (MIN_UUID_LEN..=MAX_UUID_LEN).contains(&len);
    let chars_ok = value.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
    let has_hex = value.chars().filter(char::is_ascii_hexdigit).count() >= MIN_UUID_LEN;

    if length_ok && chars_ok && has_hex {
        Ok(())
    } else {
        Err(UuidFormatError(value.to_string()))
    }
}
