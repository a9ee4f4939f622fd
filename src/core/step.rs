/// Outcome of a single pull on a cursor.
///
/// Exhaustion is an ordinary value: a cursor reports the end of its data by
/// returning `Exhausted`, and keeps returning it on every later pull. Faults
/// travel separately through [`PipelineError`](crate::core::PipelineError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<T> {
    Value(T),
    Exhausted,
}

impl<T> Step<T> {
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, Step::Value(_))
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Step::Exhausted)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Step<U> {
        match self {
            Step::Value(v) => Step::Value(f(v)),
            Step::Exhausted => Step::Exhausted,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Step::Value(v) => Some(v),
            Step::Exhausted => None,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Step::Value(v),
            None => Step::Exhausted,
        }
    }
}
