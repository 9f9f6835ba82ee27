pub mod completion;
pub mod export;
pub mod filter;
pub mod replay;
pub mod show;
pub mod summary;

use anyhow::{Result, bail};
use harlens_core::filter::{FilterCriteria, StatusClass};

/// Build index criteria from CLI flags.
///
/// "all" (any case) is the pass-everything sentinel for method and status;
/// an empty search term is treated as unset.
fn build_criteria(
    search: Option<String>,
    method: Option<String>,
    status: Option<String>,
) -> Result<FilterCriteria> {
    let mut criteria = FilterCriteria::new();

    if let Some(term) = search {
        criteria = criteria.with_search(term);
    }

    if let Some(method) = method
        && !method.eq_ignore_ascii_case("all")
    {
        criteria = criteria.with_method(method);
    }

    if let Some(status) = status
        && !status.eq_ignore_ascii_case("all")
    {
        match StatusClass::parse(&status) {
            Some(class) => criteria = criteria.with_status_class(class),
            None => bail!(
                "Unknown status class {:?} (expected 2xx, 3xx, 4xx, 5xx, other, or all)",
                status
            ),
        }
    }

    Ok(criteria)
}
