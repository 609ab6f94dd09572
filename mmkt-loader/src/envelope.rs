use mmkt_types::Page;

/// Runs `populate` over the page content and rewraps the result in the
/// original page metadata.
///
/// Offset, limit and total are never recomputed here; `populate` must return
/// exactly as many elements as it received.
pub fn preserve_envelope<T, E>(
    page: Page<T>,
    populate: impl FnOnce(Vec<T>) -> Result<Vec<T>, E>,
) -> Result<Page<T>, E> {
    let (content, meta) = page.into_parts();
    let before = content.len();
    let content = populate(content)?;
    debug_assert_eq!(before, content.len(), "bag population changed page size");
    Ok(Page::from_parts(content, meta))
}
