//! Filename sequencing for capture downloads
//!
//! Derives the next capture name from the current one by advancing the
//! numeric sequence suffix, so repeated captures never overwrite each other.

/// Advance the sequence suffix of a capture name.
///
/// Total over arbitrary input:
/// - no underscore: append `_0001`
/// - trailing underscore: append `0001`
/// - non-numeric tail after the last underscore: keep it, append `_0001`
/// - numeric tail: increment, zero-padded to at least 4 digits (the width
///   grows naturally past 9999)
pub fn next_capture_name(name: &str) -> String {
    match name.rfind('_') {
        None => format!("{}_0001", name),
        Some(index) if index == name.len() - 1 => format!("{}0001", name),
        Some(index) => match name[index + 1..]
            .parse::<u64>()
            .ok()
            .and_then(|sequence| sequence.checked_add(1))
        {
            Some(next) => format!("{}{:04}", &name[..index + 1], next),
            None => format!("{}_0001", name),
        },
    }
}
