//! Ordered record storage and identity allocation

use crate::record::Record;

/// Ordered store of records, addressed externally by identity.
///
/// The collection does not check identities for uniqueness or existence;
/// operations validate lookups before mutating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the first record with this identity
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    /// First record with this identity
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.index_of(id).and_then(|i| self.get(i))
    }

    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Replace the record at `position`, returning the previous one
    pub fn replace(&mut self, position: usize, record: Record) -> Option<Record> {
        self.records
            .get_mut(position)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Remove the record at `position`, keeping the order of the rest
    pub fn remove_at(&mut self, position: usize) -> Option<Record> {
        (position < self.records.len()).then(|| self.records.remove(position))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Identity counter shared by every entity kind.
///
/// Starts at 1 and advances by one per allocation. Values are never handed
/// out twice, even after the record holding them is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// The identity the next allocation will return
    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn allocate(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Person, Student};

    fn student(id: &str) -> Record {
        Record::Student(Student {
            id: id.to_string(),
            class: "1A".to_string(),
            person: Person::new("N", "S", "C"),
        })
    }

    fn ids(collection: &Collection) -> Vec<&str> {
        collection.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_index_of_first_match() {
        let mut collection = Collection::new();
        collection.append(student("1"));
        collection.append(student("2"));
        collection.append(student("2"));

        assert_eq!(collection.index_of("2"), Some(1));
        assert_eq!(collection.index_of("3"), None);
    }

    #[test]
    fn test_remove_at_preserves_order() {
        let mut collection = Collection::new();
        for id in ["1", "2", "3", "4"] {
            collection.append(student(id));
        }

        let removed = collection.remove_at(1).unwrap();
        assert_eq!(removed.id(), "2");
        assert_eq!(ids(&collection), vec!["1", "3", "4"]);
        assert!(collection.remove_at(3).is_none());
    }

    #[test]
    fn test_replace_in_place() {
        let mut collection = Collection::new();
        collection.append(student("1"));
        collection.append(student("2"));

        let previous = collection.replace(0, student("9")).unwrap();
        assert_eq!(previous.id(), "1");
        assert_eq!(ids(&collection), vec!["9", "2"]);
        assert!(collection.replace(5, student("5")).is_none());
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.peek(), 1);
        assert_eq!(ids.allocate(), "1");
        assert_eq!(ids.allocate(), "2");
        assert_eq!(ids.peek(), 3);
    }
}
