//! Offset and limit pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] is validated once at the boundary and then handed to
//! persistence adapters, which translate it into `LIMIT`/`OFFSET` clauses or
//! slice windows. Ordering is the adapter's responsibility; a page request
//! only describes which window of an already ordered sequence to return.

use thiserror::Error;

/// Smallest accepted page size.
pub const MIN_LIMIT: u32 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 200;
/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 50;

/// Errors raised while validating raw pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The requested limit falls outside `MIN_LIMIT..=MAX_LIMIT`.
    #[error("limit must be between {min} and {max}, got {actual}")]
    LimitOutOfRange {
        /// Smallest accepted limit.
        min: u32,
        /// Largest accepted limit.
        max: u32,
        /// Value supplied by the caller.
        actual: i64,
    },
    /// The requested offset is negative.
    #[error("offset must not be negative, got {actual}")]
    NegativeOffset {
        /// Value supplied by the caller.
        actual: i64,
    },
}

/// Validated window over an ordered result sequence.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let page = PageRequest::try_new(Some(10), Some(20)).expect("valid page");
/// assert_eq!(page.limit(), 10);
/// assert_eq!(page.offset(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    limit: u32,
    offset: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Validate optional raw parameters, applying defaults for absent values.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::LimitOutOfRange`] when `limit` is outside
    /// `1..=200` and [`PageRequestError::NegativeOffset`] when `offset` is
    /// below zero.
    pub fn try_new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, PageRequestError> {
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(raw) => u32::try_from(raw)
                .ok()
                .filter(|value| (MIN_LIMIT..=MAX_LIMIT).contains(value))
                .ok_or(PageRequestError::LimitOutOfRange {
                    min: MIN_LIMIT,
                    max: MAX_LIMIT,
                    actual: raw,
                })?,
        };
        let offset = match offset {
            None => 0,
            Some(raw) => {
                u64::try_from(raw).map_err(|_| PageRequestError::NegativeOffset { actual: raw })?
            }
        };
        Ok(Self { limit, offset })
    }

    /// Number of items the page may contain.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of leading items skipped before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Limit as a signed SQL parameter.
    #[must_use]
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Offset as a signed SQL parameter.
    ///
    /// Offsets are built from non-negative `i64` input, so the conversion
    /// only saturates for values constructed outside [`PageRequest::try_new`].
    #[must_use]
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Apply the window to an already ordered iterator.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::try_new(Some(1), Some(1)).expect("valid page");
    /// let window: Vec<_> = page.window(["a", "b", "c"]).collect();
    /// assert_eq!(window, vec!["b"]);
    /// ```
    pub fn window<I>(&self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take)
    }
}
