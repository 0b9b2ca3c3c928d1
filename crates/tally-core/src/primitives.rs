//! # Input Limits
//!
//! Fixed bounds applied wherever untrusted input enters the system
//! (CLI input files, HTTP request bodies). The reductions themselves
//! accept any length; these limits keep a single request bounded.

use crate::types::CartItem;

/// Maximum number of elements in one numeric or record sequence.
pub const MAX_SEQUENCE_LENGTH: usize = 100_000;

/// Maximum length in bytes of an item or user name.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum size of an input file read by the CLI (16 MiB).
pub const MAX_INPUT_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Check a sequence length against [`MAX_SEQUENCE_LENGTH`].
pub fn check_sequence_length(len: usize, what: &str) -> Result<(), crate::TallyError> {
    if len > MAX_SEQUENCE_LENGTH {
        return Err(crate::TallyError::InvalidArgument(format!(
            "{} has {} elements, maximum is {}",
            what, len, MAX_SEQUENCE_LENGTH
        )));
    }
    Ok(())
}

/// Check a name length against [`MAX_NAME_LENGTH`].
pub fn check_name_length(name: &str, what: &str) -> Result<(), crate::TallyError> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(crate::TallyError::InvalidArgument(format!(
            "{} length {} exceeds maximum {} bytes",
            what,
            name.len(),
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Check a cart: its length and every item name.
pub fn check_cart(items: &[CartItem]) -> Result<(), crate::TallyError> {
    check_sequence_length(items.len(), "items")?;
    items
        .iter()
        .try_for_each(|item| check_name_length(&item.name, "item name"))
}
