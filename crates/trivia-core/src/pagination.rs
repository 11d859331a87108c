//! Fixed-size page slicing.
//!
//! Pages are numbered from 1. For `total > 0` the valid pages are
//! `1..=ceil(total / page_size)`; everything else is `NotFound`, including
//! page 1 of an empty collection.

use crate::error::{Result, TriviaError};

/// Number of questions per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed to hold `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Return the `page`-th slice of `items`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Result<&[T]> {
    if page_size == 0 {
        return Err(TriviaError::BadRequest(
            "page size must be positive".to_string(),
        ));
    }

    let pages = page_count(items.len(), page_size);
    if page == 0 || page > pages {
        return Err(TriviaError::NotFound(format!(
            "page {} (of {})",
            page, pages
        )));
    }

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let slice = &items[start..end];

    if slice.is_empty() {
        return Err(TriviaError::NotFound(format!("page {}", page)));
    }

    Ok(slice)
}

/// Parse a raw `page` query value. A missing value means page 1.
pub fn parse_page(raw: Option<&str>) -> Result<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| TriviaError::BadRequest(format!("invalid page '{}'", value))),
    }
}
