// Tagged lookup result
//
// Separates "the question applies but nothing matched" from "the question does
// not apply to this country" (no subdivisions). Callers that want the flat
// string surface use `or_unknown()`.

/// Status string returned for a lookup that found nothing.
pub const UNKNOWN: &str = "unknown";

/// Result of a subdivision query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup<T> {
    /// A value was found
    Found(T),
    /// The query was valid for this country but matched nothing
    NotFound,
    /// The country has no subdivisions, so the query was not attempted
    NotApplicable,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Lookup::NotApplicable)
    }

    /// The found value, dropping the distinction between the two misses
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound | Lookup::NotApplicable => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::NotApplicable => Lookup::NotApplicable,
        }
    }
}

impl<T: AsRef<str>> Lookup<T> {
    /// Flatten to the string surface: the value, `"unknown"` on a miss, or
    /// `None` when the query does not apply.
    ///
    /// The sentinel is never case-transformed, even for upper-cased lookups.
    pub fn or_unknown(&self) -> Option<&str> {
        match self {
            Lookup::Found(v) => Some(v.as_ref()),
            Lookup::NotFound => Some(UNKNOWN),
            Lookup::NotApplicable => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_unknown() {
        assert_eq!(Lookup::Found("NSW").or_unknown(), Some("NSW"));
        assert_eq!(Lookup::<&str>::NotFound.or_unknown(), Some(UNKNOWN));
        assert_eq!(Lookup::<&str>::NotApplicable.or_unknown(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Lookup::from(Some(3)), Lookup::Found(3));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
    }

    #[test]
    fn test_map_keeps_miss_kind() {
        let na: Lookup<&str> = Lookup::NotApplicable;
        assert!(na.map(str::len).is_not_applicable());
        assert_eq!(Lookup::Found("abc").map(str::len), Lookup::Found(3));
        assert_eq!(Lookup::Found("abc").found(), Some("abc"));
        assert_eq!(Lookup::<&str>::NotFound.found(), None);
    }
}
