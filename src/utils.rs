//! # Utility Functions Module
//!
//! Small helpers shared across the crate.

/// Converts an iterable of string-like items to `Vec<String>`.
///
/// Command argument lists mix string literals and formatted values; this
/// helper removes the repeated `.to_string()` noise when building them.
///
/// # Example
/// ```rust
/// use folder_media_converter::utils::to_string_vec;
///
/// let crf = 23;
/// let args = to_string_vec(["-crf", &crf.to_string(), "-threads", "0"]);
/// ```
pub fn to_string_vec<T, I>(items: I) -> Vec<String>
where
    T: ToString,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Convenience macro around [`to_string_vec`].
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        vec![$(::std::string::ToString::to_string(&$item)),*]
    };
}
