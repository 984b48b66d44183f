use crate::domain::email::{DisplayIndex, EmailRecord, WireEmail};

/// Snapshot of the most recently fetched batch, addressable by display index.
#[derive(Debug, Clone, Default)]
pub struct EmailCache {
    records: Vec<EmailRecord>,
}

impl EmailCache {
    /// Swap in a whole new batch. A server-supplied index wins; otherwise the
    /// 1-based batch position is used.
    pub fn replace(&mut self, batch: Vec<WireEmail>) {
        self.records = batch
            .into_iter()
            .enumerate()
            .map(|(pos, wire)| {
                let index = wire.index.unwrap_or(pos as DisplayIndex + 1);
                EmailRecord::from_wire(wire, index)
            })
            .collect();
    }

    pub fn find_by_index(&self, index: DisplayIndex) -> Option<&EmailRecord> {
        self.records.iter().find(|e| e.index == index)
    }

    pub fn records(&self) -> &[EmailRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(subject: &str) -> WireEmail {
        WireEmail {
            subject: Some(subject.into()),
            ..Default::default()
        }
    }

    #[test]
    fn positions_become_one_based_indices() {
        let mut cache = EmailCache::default();
        cache.replace(vec![wire("e1"), wire("e2"), wire("e3")]);

        let found = cache.find_by_index(2).expect("index 2 cached");
        assert_eq!(found.subject.as_deref(), Some("e2"));
        assert!(cache.find_by_index(4).is_none());
        assert!(cache.find_by_index(0).is_none());
    }

    #[test]
    fn server_index_wins() {
        let mut cache = EmailCache::default();
        cache.replace(vec![
            WireEmail {
                index: Some(7),
                ..wire("seven")
            },
            wire("second"),
        ]);
        assert_eq!(cache.find_by_index(7).and_then(|e| e.subject.as_deref()), Some("seven"));
        assert_eq!(cache.find_by_index(2).and_then(|e| e.subject.as_deref()), Some("second"));
        assert!(cache.find_by_index(1).is_none());
    }

    #[test]
    fn replace_drops_previous_batch() {
        let mut cache = EmailCache::default();
        cache.replace(vec![wire("a"), wire("b"), wire("c")]);
        cache.replace(vec![wire("z")]);
        assert_eq!(cache.len(), 1);
        assert!(cache.find_by_index(3).is_none());

        cache.replace(Vec::new());
        assert!(cache.is_empty());
    }
}
