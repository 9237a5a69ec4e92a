//! Sequential probing of handle candidates against the live store.
//!
//! The resolver only reads. The store's unique constraint remains the
//! backstop for candidates claimed between a probe and the insert.

use std::future::Future;

use crate::domain::{Handle, HandleBase};

/// First numeric suffix tried once the bare base is taken.
pub const FIRST_HANDLE_SUFFIX: u64 = 2;

/// Failures raised while resolving a handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleResolutionError<E> {
    /// The existence probe itself failed.
    #[error("handle probe failed: {0}")]
    Probe(#[source] E),
    /// Every representable suffix for the base is taken.
    #[error("handle suffixes exhausted for base {base}")]
    SuffixExhausted { base: String },
}

/// Resolve the first free candidate for `base`.
///
/// Candidates are tried in the order `base`, `base2`, `base3`, ... and the
/// first one `is_taken` reports as absent is returned. Probing stops early
/// only on a probe failure or when the suffix would overflow.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use std::convert::Infallible;
///
/// use user_directory::domain::{HandleBase, resolve_unique_handle};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let taken: HashSet<&str> = ["alee", "alee2"].into_iter().collect();
/// let base = HandleBase::derive("Amy", "Lee");
/// let handle = resolve_unique_handle(&base, |candidate| {
///     let hit = taken.contains(candidate.as_ref());
///     async move { Ok::<_, Infallible>(hit) }
/// })
/// .await
/// .expect("resolves");
/// assert_eq!(handle.as_ref(), "alee3");
/// # });
/// ```
pub async fn resolve_unique_handle<F, Fut, E>(
    base: &HandleBase,
    mut is_taken: F,
) -> Result<Handle, HandleResolutionError<E>>
where
    F: FnMut(Handle) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let candidate = base.unsuffixed();
    if !is_taken(candidate.clone())
        .await
        .map_err(HandleResolutionError::Probe)?
    {
        return Ok(candidate);
    }

    let mut suffix = FIRST_HANDLE_SUFFIX;
    loop {
        let candidate = base.with_suffix(suffix);
        if !is_taken(candidate.clone())
            .await
            .map_err(HandleResolutionError::Probe)?
        {
            return Ok(candidate);
        }
        suffix = suffix
            .checked_add(1)
            .ok_or_else(|| HandleResolutionError::SuffixExhausted {
                base: base.to_string(),
            })?;
    }
}
