//! Best-effort lookup results

/// Outcome of a lookup that was attempted but may legitimately find nothing.
///
/// `Unresolved` means the lookup ran and came back empty (page unreachable,
/// marker missing, no geocoding match). It is not an error: downstream
/// stages carry the absence through instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Resolved(T),
    Unresolved,
}

impl<T> Lookup<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Lookup::Resolved(_))
    }

    /// The resolved value, if any.
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Lookup::Resolved(value) => Some(value),
            Lookup::Unresolved => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Resolved(value) => Lookup::Resolved(f(value)),
            Lookup::Unresolved => Lookup::Unresolved,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => Lookup::Resolved(value),
            None => Lookup::Unresolved,
        }
    }
}
