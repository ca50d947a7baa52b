//! Output accumulation for a single formatting pass.

/// Ordered sequence of emitted text fragments.
///
/// Fragments are only ever appended, and the most recent one can be taken back
/// with [`ChunkBuffer::pop_last`]. That is what lets separators be written
/// eagerly after every list item and trimmed once the list ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkBuffer {
    chunks: Vec<String>,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, fragment: impl Into<String>) {
        self.chunks.push(fragment.into());
    }

    /// Removes and returns the last fragment.
    ///
    /// # Panics
    /// Panics if the buffer is empty. Popping more than was pushed is a bug in
    /// the caller, not a condition of the input.
    pub fn pop_last(&mut self) -> String {
        match self.chunks.pop() {
            Some(chunk) => chunk,
            None => panic!("pop_last called on an empty chunk buffer"),
        }
    }

    pub fn render(&self) -> String {
        self.chunks.concat()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn last(&self) -> Option<&str> {
        self.chunks.last().map(String::as_str)
    }
}

impl AsMut<ChunkBuffer> for ChunkBuffer {
    fn as_mut(&mut self) -> &mut ChunkBuffer {
        self
    }
}

/// Emits `items` separated by `separator`.
///
/// Every item is followed by the separator, and the one after the last item is
/// popped again, so zero items emit nothing and one item emits no separator.
pub fn delimited<C, I, F, E>(ctx: &mut C, items: I, separator: &str, mut emit: F) -> Result<(), E>
where
    C: AsMut<ChunkBuffer>,
    I: IntoIterator,
    F: FnMut(&mut C, I::Item) -> Result<(), E>,
{
    let mut emitted = false;
    for item in items {
        emit(ctx, item)?;
        ctx.as_mut().append(separator);
        emitted = true;
    }
    if emitted {
        ctx.as_mut().pop_last();
    }
    Ok(())
}
