//! Traits implemented by user types.

use crate::value::Scalar;

/// An enumerated type that can be filtered on.
///
/// The external representation (what appears in the input mapping) is
/// [`name`](Self::name). The storage representation defaults to the same name
/// as text; override [`stored`](Self::stored) when the column holds something
/// else, such as a numeric code.
///
/// # Example
///
/// ```
/// use sift::{FilterEnum, Scalar};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Status {
///     Open,
///     Closed,
/// }
///
/// impl FilterEnum for Status {
///     fn variants() -> &'static [Self] {
///         &[Status::Open, Status::Closed]
///     }
///
///     fn name(&self) -> &'static str {
///         match self {
///             Status::Open => "open",
///             Status::Closed => "closed",
///         }
///     }
///
///     fn stored(&self) -> Scalar {
///         Scalar::Integer(*self as i64)
///     }
/// }
///
/// assert_eq!(Status::from_name("closed"), Some(Status::Closed));
/// assert_eq!(Status::Closed.stored(), Scalar::Integer(1));
/// ```
pub trait FilterEnum: Sized + Clone + Send + Sync + 'static {
    /// Every variant, in declaration order.
    fn variants() -> &'static [Self];

    /// The stable external name of this variant.
    ///
    /// Names must be unique across variants.
    fn name(&self) -> &'static str;

    /// The value stored in the column for this variant.
    fn stored(&self) -> Scalar {
        Scalar::Text(self.name().to_string())
    }

    /// Looks a variant up by its external name.
    fn from_name(name: &str) -> Option<Self> {
        Self::variants().iter().find(|v| v.name() == name).cloned()
    }
}
