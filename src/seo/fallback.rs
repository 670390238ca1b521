//! Prioritized defaults for optional post fields

/// Return the first candidate that is present and not empty
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
}
