/// A cursor over the single batch of a fully materialized result.
///
/// `distinct` results are never paged by the server, so the cursor
/// holds its one batch from construction and performs no I/O. The
/// batch is yielded exactly once; afterwards the cursor only reports
/// exhaustion.
#[derive(Debug)]
pub struct SingleBatchCursor<T> {
    batch: Option<Vec<T>>,
}

impl<T> SingleBatchCursor<T> {
    pub(crate) fn new(batch: Vec<T>) -> Self {
        Self { batch: Some(batch) }
    }

    /// Whether the batch is still unconsumed.
    pub fn has_next(&self) -> bool {
        self.batch.is_some()
    }

    /// The one batch, or `None` once it has been taken.
    pub fn next_batch(&mut self) -> Option<Vec<T>> {
        self.batch.take()
    }

    /// Marks the cursor exhausted. It owns no network resource, so
    /// there is nothing else to release.
    pub fn close(&mut self) {
        self.batch = None;
    }
}

impl<T> Iterator for SingleBatchCursor<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        self.next_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::SingleBatchCursor;

    #[test]
    fn yields_its_batch_exactly_once() {
        let mut cursor = SingleBatchCursor::new(vec![1, 2, 3]);
        assert!(cursor.has_next());
        assert_eq!(cursor.next_batch(), Some(vec![1, 2, 3]));
        assert!(!cursor.has_next());
        assert_eq!(cursor.next_batch(), None);
    }

    #[test]
    fn empty_batch_is_still_one_batch() {
        let mut cursor: SingleBatchCursor<i32> = SingleBatchCursor::new(Vec::new());
        assert!(cursor.has_next());
        assert_eq!(cursor.next_batch(), Some(Vec::new()));
        assert_eq!(cursor.next_batch(), None);
    }

    #[test]
    fn close_marks_exhausted() {
        let mut cursor = SingleBatchCursor::new(vec!["a"]);
        cursor.close();
        assert!(!cursor.has_next());
        assert_eq!(cursor.next_batch(), None);
    }

    #[test]
    fn iterates_as_one_step() {
        let cursor = SingleBatchCursor::new(vec![10, 20]);
        let batches: Vec<Vec<i32>> = cursor.collect();
        assert_eq!(batches, vec![vec![10, 20]]);
    }
}
