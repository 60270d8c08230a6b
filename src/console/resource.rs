//! A list of records held by the API.

use std::fmt;
use crate::api::ident::{ObjectId, Record};


//------------ RemoteList ----------------------------------------------------

/// The local copy of a collection fetched from the API.
///
/// Every list view owns one of these. It starts out loading, and then holds
/// either the fetched records or the message of the failed fetch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RemoteList<T> {
    Loading,
    Failed(String),
    Loaded(Vec<T>),
}

impl<T> Default for RemoteList<T> {
    fn default() -> Self {
        RemoteList::Loading
    }
}

impl<T: Record> RemoteList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with the outcome of a fetch.
    ///
    /// A failed fetch keeps the error's message and hands the error back.
    pub fn load<E: fmt::Display>(
        &mut self, res: Result<Vec<T>, E>
    ) -> Result<(), E> {
        match res {
            Ok(items) => {
                *self = RemoteList::Loaded(items);
                Ok(())
            }
            Err(err) => {
                *self = RemoteList::Failed(err.to_string());
                Err(err)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RemoteList::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RemoteList::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Returns the records, or an empty slice if there are none yet.
    pub fn items(&self) -> &[T] {
        match self {
            RemoteList::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn get(&self, id: &ObjectId) -> Option<&T> {
        self.items().iter().find(|item| item.id() == id)
    }

    /// Drops the record with the given id.
    ///
    /// Returns whether there was such a record. An unknown id leaves the
    /// list as it was.
    pub fn remove(&mut self, id: &ObjectId) -> bool {
        match self {
            RemoteList::Loaded(items) => {
                let len = items.len();
                items.retain(|item| item.id() != id);
                items.len() != len
            }
            _ => false,
        }
    }

    /// Appends a record, turning a list that never loaded into one that
    /// holds just this record.
    pub fn push(&mut self, item: T) {
        match self {
            RemoteList::Loaded(items) => items.push(item),
            _ => *self = RemoteList::Loaded(vec![item]),
        }
    }

    /// Changes the record with the given id in place.
    ///
    /// Returns whether there was such a record.
    pub fn update(&mut self, id: &ObjectId, op: impl FnOnce(&mut T)) -> bool {
        match self {
            RemoteList::Loaded(items) => {
                match items.iter_mut().find(|item| item.id() == id) {
                    Some(item) => {
                        op(item);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    pub fn count_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.items().iter().filter(|item| pred(item)).count()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Eq, PartialEq)]
    struct Item {
        id: ObjectId,
        label: &'static str,
    }

    impl Record for Item {
        fn id(&self) -> &ObjectId {
            &self.id
        }
    }

    fn item(id: u64, label: &'static str) -> Item {
        Item { id: id.into(), label }
    }

    fn loaded() -> RemoteList<Item> {
        let mut list = RemoteList::new();
        list.load(Ok::<_, String>(vec![item(1, "a"), item(2, "b")])).unwrap();
        list
    }

    #[test]
    fn starts_loading() {
        let list = RemoteList::<Item>::new();
        assert!(list.is_loading());
        assert!(list.items().is_empty());
    }

    #[test]
    fn failed_load_keeps_message() {
        let mut list = loaded();
        assert!(
            list.load(Err::<Vec<Item>, _>("Error al cargar los usuarios"))
                .is_err()
        );
        assert_eq!(list.error(), Some("Error al cargar los usuarios"));
        assert!(list.is_empty());
    }

    #[test]
    fn remove_known_and_unknown() {
        let mut list = loaded();
        assert!(list.remove(&ObjectId::from(1)));
        assert_eq!(list.items(), &[item(2, "b")]);

        let before = list.clone();
        assert!(!list.remove(&ObjectId::from(99)));
        assert_eq!(list, before);
    }

    #[test]
    fn push_and_update() {
        let mut list = RemoteList::new();
        list.push(item(3, "c"));
        assert_eq!(list.len(), 1);

        let mut list = loaded();
        list.push(item(3, "c"));
        assert!(list.update(&ObjectId::from(2), |i| i.label = "B"));
        assert!(!list.update(&ObjectId::from(9), |i| i.label = "X"));
        assert_eq!(list.get(&ObjectId::from(2)).unwrap().label, "B");
        assert_eq!(list.count_where(|i| i.label != "X"), 3);
    }
}
