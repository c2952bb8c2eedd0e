/// Byte-level progress of one streamed transfer.
///
/// `total` comes from the response's declared length and may be absent; in
/// that case no percentage can be reported but the transfer still proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferProgress {
    /// Bytes received so far.
    pub downloaded: u64,
    /// Declared total byte size, when the response carries one.
    pub total: Option<u64>,
}

impl TransferProgress {
    pub fn new(total: Option<u64>) -> Self {
        Self {
            downloaded: 0,
            total,
        }
    }

    /// Record one received chunk.
    pub fn advance(&mut self, chunk_len: usize) {
        self.downloaded = self.downloaded.saturating_add(chunk_len as u64);
    }

    /// Completion percentage clamped to `0..=100`, or `None` when the total
    /// size is unknown.
    pub fn percent(&self) -> Option<u8> {
        let total = self.total?;
        if total == 0 {
            return Some(100);
        }
        Some(((self.downloaded.saturating_mul(100)) / total).min(100) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_clamped_and_monotonic() {
        let mut progress = TransferProgress::new(Some(200));
        let mut last = 0;
        for _ in 0..5 {
            progress.advance(60);
            let pct = progress.percent().unwrap();
            assert!(pct >= last);
            assert!(pct <= 100);
            last = pct;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn unknown_total_reports_no_percent() {
        let mut progress = TransferProgress::new(None);
        progress.advance(1024);
        assert_eq!(progress.percent(), None);
    }

    #[test]
    fn zero_total_counts_as_complete() {
        let progress = TransferProgress::new(Some(0));
        assert_eq!(progress.percent(), Some(100));
    }
}
