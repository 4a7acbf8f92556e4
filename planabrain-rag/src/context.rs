use planabrain_retrieval::Chunk;

const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Renders chunks as `SOURCE: <source>\n<text>` blocks, in the given order.
pub fn build_context<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a Chunk>,
{
    chunks
        .into_iter()
        .map(|chunk| format!("SOURCE: {}\n{}", chunk.source, chunk.text))
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
