/// A closed vocabulary with a fixed wire spelling for each member.
pub trait ClosedSet: Copy + Sized + 'static {
    /// Every member in declared order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
}

/// Returns the member spelled exactly `raw`, or `default`.
pub fn parse_or_default<T: ClosedSet>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|raw| T::ALL.iter().copied().find(|member| member.as_str() == raw))
        .unwrap_or(default)
}

/// String-level variant: `raw` if it is one of `allowed`, otherwise `default`.
pub fn parse_str<'a>(raw: &'a str, allowed: &[&str], default: &'a str) -> &'a str {
    if allowed.contains(&raw) { raw } else { default }
}
