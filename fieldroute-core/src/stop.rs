use std::collections::BTreeMap;
use std::fmt;

use crate::GeoPoint;

/// Opaque identifier of a [`Stop`].
///
/// The sequencer never interprets the value; it only compares identifiers to
/// resolve a pinned stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StopId(String);

impl StopId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StopId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A location a sales representative has to visit.
///
/// `metadata` carries caller data such as customer name or address and is
/// passed through sequencing untouched.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use fieldroute_core::{GeoPoint, Stop};
///
/// let stop = Stop::new(
///     "lead-17",
///     GeoPoint::new(52.5, 13.4),
///     BTreeMap::from([("name".into(), "Bakery Schulz".into())]),
/// );
///
/// assert_eq!(stop.id.as_str(), "lead-17");
/// assert_eq!(stop.metadata.get("name"), Some(&"Bakery Schulz".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Caller-assigned identifier; used to resolve a pinned stop.
    pub id: StopId,
    /// Where the stop is.
    pub location: GeoPoint,
    /// Free-form caller data, carried through unchanged.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: BTreeMap<String, String>,
}

impl Stop {
    /// Construct a stop with the provided metadata.
    pub fn new(
        id: impl Into<StopId>,
        location: GeoPoint,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            metadata,
        }
    }

    /// Construct a stop without metadata.
    ///
    /// # Examples
    /// ```
    /// use fieldroute_core::{GeoPoint, Stop};
    ///
    /// let stop = Stop::at("a", GeoPoint::new(0.0, 0.0));
    /// assert!(stop.metadata.is_empty());
    /// ```
    pub fn at(id: impl Into<StopId>, location: GeoPoint) -> Self {
        Self::new(id, location, BTreeMap::new())
    }
}
