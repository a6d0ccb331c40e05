use std::num::NonZeroUsize;

/// Returns the `page`-th window of `page_size` items, pages starting at 1.
///
/// Pages past the end, and page 0, are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> &[T] {
    let Some(skipped_pages) = page.checked_sub(1) else {
        return &items[..0];
    };
    let size = page_size.get();
    let start = skipped_pages.saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}
