#[derive(Debug, Clone)]
pub struct Chunk {
    pub content: String,
}

impl Chunk {
    pub fn new(content: String) -> Self {
        Self {
            content,
        }
    }
}

/// Cuts `content` into exactly `count` consecutive chunks of equal character
/// length. The tail that does not fill a whole chunk is dropped, and a text
/// shorter than `count` characters gives empty chunks.
pub fn equal_chunks(content: &str, count: usize) -> Vec<Chunk> {
    if count == 0 {
        return Vec::new();
    }
    let chunk_size = content.chars().count() / count;

    // byte offset of every char, plus the end of the string
    let offsets: Vec<usize> = content
        .char_indices()
        .map(|(pos, _)| pos)
        .chain(std::iter::once(content.len()))
        .collect();

    (0..count)
        .map(|i| {
            let start = offsets[i * chunk_size];
            let end = offsets[(i + 1) * chunk_size];
            Chunk::new(content[start..end].to_string())
        })
        .collect()
}
