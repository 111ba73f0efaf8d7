//! Request construction module
//!
//! This module turns user input into the pieces of a reviews request:
//! the product context parsed from the page URL, the star-rating filter,
//! and the JSON payload sent for each page.

mod context;
mod payload;

pub use context::RequestContext;
pub use payload::RequestPayload;

use crate::ReviewError;

/// Lowest star rating the API accepts
pub const MIN_STARS: u8 = 1;

/// Highest star rating the API accepts
pub const MAX_STARS: u8 = 5;

/// Set of star ratings to include, ordered highest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarFilter(Vec<u8>);

impl StarFilter {
    /// Builds a filter from arbitrary star values
    ///
    /// Values are deduplicated and sorted descending. An empty filter or a
    /// value outside 1..=5 is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use review_harvest::request::StarFilter;
    ///
    /// let filter = StarFilter::new([1, 5, 3, 5]).unwrap();
    /// assert_eq!(filter.as_slice(), &[5, 3, 1]);
    /// ```
    pub fn new(stars: impl IntoIterator<Item = u8>) -> Result<Self, ReviewError> {
        let mut stars: Vec<u8> = stars.into_iter().collect();

        if let Some(bad) = stars.iter().find(|s| !(MIN_STARS..=MAX_STARS).contains(*s)) {
            return Err(ReviewError::InvalidInput(format!(
                "star rating must be between {} and {}, got {}",
                MIN_STARS, MAX_STARS, bad
            )));
        }

        stars.sort_unstable_by(|a, b| b.cmp(a));
        stars.dedup();

        if stars.is_empty() {
            return Err(ReviewError::InvalidInput(
                "at least one star rating must be selected".to_string(),
            ));
        }

        Ok(Self(stars))
    }

    /// Every star rating, 5 down to 1
    pub fn all() -> Self {
        Self((MIN_STARS..=MAX_STARS).rev().collect())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Default for StarFilter {
    fn default() -> Self {
        Self::all()
    }
}
