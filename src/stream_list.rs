//! The ordered watch list: entries that can be added, completed, edited in
//! place, dragged into a new order and removed.
//!
//! Every change is written straight through to the injected store. Edit and
//! drag state is interaction state and never reaches the store.

use std::collections::HashSet;

use crate::models::{Entry, EntryId};
use crate::store::{self, KeyValueStore};

pub const STORAGE_KEY: &str = "eztechmovie_streamlist";

/// The one in-progress edit, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: EntryId,
    pub draft: String,
}

/// One entry as it should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRow<'a> {
    pub position: usize,
    pub entry: &'a Entry,
    /// Set only for the entry being edited.
    pub draft: Option<&'a str>,
}

impl EntryRow<'_> {
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }
}

pub struct StreamList<S> {
    store: S,
    entries: Vec<Entry>,
    editing: Option<EditSession>,
    grabbed: Option<EntryId>,
}

impl<S> StreamList<S>
where
    S: KeyValueStore,
{
    /// Hydrates the list from `store`. Anything unreadable yields an empty list.
    pub fn load(store: S) -> Self {
        let stored: Vec<Entry> = store::load_json(&store, STORAGE_KEY).unwrap_or_default();

        let mut seen = HashSet::new();
        let entries: Vec<Entry> = stored
            .into_iter()
            .filter(|entry| {
                let fresh = seen.insert(entry.id.clone());
                if !fresh {
                    log::warn!("dropping duplicate stream list entry {}", entry.id);
                }
                fresh
            })
            .collect();
        log::debug!("loaded {} stream list entries", entries.len());

        Self {
            store,
            entries,
            editing: None,
            grabbed: None,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn grabbed(&self) -> Option<&EntryId> {
        self.grabbed.as_ref()
    }

    pub fn rows(&self) -> Vec<EntryRow<'_>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(position, entry)| EntryRow {
                position,
                entry,
                draft: self
                    .editing
                    .as_ref()
                    .filter(|session| session.id == entry.id)
                    .map(|session| session.draft.as_str()),
            })
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Adds `raw_text`, trimmed, to the end of the list. Blank input is ignored.
    pub fn append(&mut self, raw_text: &str) -> Option<EntryId> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }
        let entry = Entry::new(text.to_string());
        let id = entry.id.clone();
        log::debug!("appending entry {} ({:?})", id, entry.text);
        self.entries.push(entry);
        self.persist();
        Some(id)
    }

    pub fn delete(&mut self, id: &EntryId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.entries.remove(index);
        if self.editing.as_ref().is_some_and(|session| &session.id == id) {
            self.editing = None;
        }
        if self.grabbed.as_ref() == Some(id) {
            self.grabbed = None;
        }
        log::debug!("deleted entry {}", id);
        self.persist();
        true
    }

    pub fn toggle_complete(&mut self, id: &EntryId) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| &entry.id == id) else {
            return false;
        };
        entry.complete = !entry.complete;
        self.persist();
        true
    }

    /// Starts editing `id` with its current text as the draft. Any other
    /// in-progress edit is dropped.
    pub fn begin_edit(&mut self, id: &EntryId) -> bool {
        let Some(entry) = self.get(id) else {
            return false;
        };
        let session = EditSession {
            id: id.clone(),
            draft: entry.text.clone(),
        };
        if let Some(previous) = self.editing.replace(session) {
            if &previous.id != id {
                log::debug!("discarding unsaved edit of {}", previous.id);
            }
        }
        true
    }

    pub fn update_draft(&mut self, id: &EntryId, value: impl Into<String>) -> bool {
        match self.editing.as_mut() {
            Some(session) if &session.id == id => {
                session.draft = value.into();
                true
            }
            _ => false,
        }
    }

    /// Ends the edit of `id`. A blank draft leaves the text as it was.
    pub fn save_edit(&mut self, id: &EntryId) -> bool {
        let Some(session) = self.take_edit(id) else {
            return false;
        };
        let text = session.draft.trim();
        if !text.is_empty() {
            if let Some(entry) = self.entries.iter_mut().find(|entry| &entry.id == id) {
                entry.text = text.to_string();
            }
        }
        self.persist();
        true
    }

    pub fn cancel_edit(&mut self, id: &EntryId) -> bool {
        if self.take_edit(id).is_none() {
            return false;
        }
        self.persist();
        true
    }

    /// First half of a drag: remembers which entry is being moved.
    pub fn begin_move(&mut self, id: &EntryId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.grabbed = Some(id.clone());
        true
    }

    /// Second half of a drag: moves the grabbed entry to the index `target`
    /// currently occupies. Returns whether the order changed.
    pub fn complete_move(&mut self, target: &EntryId) -> bool {
        let Some(source) = self.grabbed.take() else {
            return false;
        };
        if &source == target {
            return false;
        }
        match (self.position(&source), self.position(target)) {
            (Some(from), Some(to)) => self.move_entry(from, to),
            _ => false,
        }
    }

    /// Drag abandoned without a drop.
    pub fn end_move(&mut self) {
        self.grabbed = None;
    }

    /// Removes the entry at `from` and reinserts it at `to`, shifting the
    /// entries in between. `to` past the end means the end.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() || from == to {
            return false;
        }
        let entry = self.entries.remove(from);
        let to = to.min(self.entries.len());
        log::debug!("moving entry {} from {} to {}", entry.id, from, to);
        self.entries.insert(to, entry);
        self.persist();
        true
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }

    fn take_edit(&mut self, id: &EntryId) -> Option<EditSession> {
        match &self.editing {
            Some(session) if &session.id == id => self.editing.take(),
            _ => None,
        }
    }

    fn persist(&mut self) {
        store::save_json(&mut self.store, STORAGE_KEY, &self.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::BrokenStore;
    use crate::store::MemoryStore;

    fn list_of(titles: &[&str]) -> (StreamList<MemoryStore>, Vec<EntryId>) {
        let mut list = StreamList::load(MemoryStore::new());
        let ids = titles
            .iter()
            .map(|title| list.append(title).unwrap())
            .collect();
        (list, ids)
    }

    fn texts<S: KeyValueStore>(list: &StreamList<S>) -> Vec<&str> {
        list.entries().iter().map(|entry| entry.text.as_str()).collect()
    }

    #[test]
    fn blank_append_is_ignored() {
        let (mut list, _) = list_of(&["Dune"]);
        assert_eq!(list.append(""), None);
        assert_eq!(list.append("   \t "), None);
        assert_eq!(list.len(), 1);
        assert_eq!(list.store().writes(), 1);
    }

    #[test]
    fn append_trims_text() {
        let mut list = StreamList::load(MemoryStore::new());
        let id = list.append("  Dune  ").unwrap();
        let entry = list.get(&id).unwrap();
        assert_eq!(entry.text, "Dune");
        assert!(!entry.complete);
        assert_eq!(list.entries().last().unwrap().id, id);
    }

    #[test]
    fn deleting_unknown_id_changes_nothing() {
        let (mut list, _) = list_of(&["A", "B"]);
        let before = list.entries().to_vec();
        assert!(!list.delete(&EntryId::from("missing")));
        assert_eq!(list.entries(), &before[..]);
    }

    #[test]
    fn delete_removes_entry_and_its_edit() {
        let (mut list, ids) = list_of(&["A", "B"]);
        list.begin_edit(&ids[0]);
        list.begin_move(&ids[0]);
        assert!(list.delete(&ids[0]));
        assert_eq!(texts(&list), ["B"]);
        assert!(list.editing().is_none());
        assert!(list.grabbed().is_none());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let (mut list, ids) = list_of(&["A"]);
        assert!(list.toggle_complete(&ids[0]));
        assert!(list.get(&ids[0]).unwrap().complete);
        assert!(list.toggle_complete(&ids[0]));
        assert!(!list.get(&ids[0]).unwrap().complete);
        assert!(!list.toggle_complete(&EntryId::from("missing")));
    }

    #[test]
    fn save_edit_with_blank_draft_keeps_text_and_leaves_editing() {
        let (mut list, ids) = list_of(&["Matrix"]);
        assert!(list.begin_edit(&ids[0]));
        assert!(list.update_draft(&ids[0], "   "));
        assert!(list.save_edit(&ids[0]));
        assert_eq!(list.get(&ids[0]).unwrap().text, "Matrix");
        assert!(list.editing().is_none());
    }

    #[test]
    fn save_edit_trims_draft() {
        let (mut list, ids) = list_of(&["Matrix"]);
        list.begin_edit(&ids[0]);
        assert_eq!(list.editing().unwrap().draft, "Matrix");
        list.update_draft(&ids[0], "  Matrix 2  ");
        list.save_edit(&ids[0]);
        assert_eq!(list.get(&ids[0]).unwrap().text, "Matrix 2");
    }

    #[test]
    fn cancel_edit_keeps_text() {
        let (mut list, ids) = list_of(&["Matrix"]);
        list.begin_edit(&ids[0]);
        list.update_draft(&ids[0], "Something else");
        assert!(list.cancel_edit(&ids[0]));
        assert_eq!(list.get(&ids[0]).unwrap().text, "Matrix");
        assert!(list.editing().is_none());
        assert!(!list.cancel_edit(&ids[0]));
    }

    #[test]
    fn only_one_entry_edits_at_a_time() {
        let (mut list, ids) = list_of(&["A", "B"]);
        list.begin_edit(&ids[0]);
        list.update_draft(&ids[0], "A2");
        list.begin_edit(&ids[1]);

        assert!(!list.update_draft(&ids[0], "A3"));
        assert!(!list.save_edit(&ids[0]));
        let editing: Vec<bool> = list.rows().iter().map(EntryRow::is_editing).collect();
        assert_eq!(editing, [false, true]);
        assert_eq!(list.rows()[1].draft, Some("B"));
        assert_eq!(texts(&list), ["A", "B"]);
    }

    #[test]
    fn dropping_first_on_last_moves_it_to_the_end() {
        let (mut list, ids) = list_of(&["A", "B", "C"]);
        assert!(list.begin_move(&ids[0]));
        assert!(list.complete_move(&ids[2]));
        assert_eq!(texts(&list), ["B", "C", "A"]);
        assert!(list.grabbed().is_none());
    }

    #[test]
    fn dropping_last_on_first_moves_it_to_the_front() {
        let (mut list, ids) = list_of(&["A", "B", "C"]);
        list.begin_move(&ids[2]);
        list.complete_move(&ids[0]);
        assert_eq!(texts(&list), ["C", "A", "B"]);
    }

    #[test]
    fn dropping_on_itself_or_without_grab_is_a_no_op() {
        let (mut list, ids) = list_of(&["A", "B", "C"]);
        let writes = list.store().writes();

        list.begin_move(&ids[0]);
        assert!(!list.complete_move(&ids[0]));
        assert!(!list.complete_move(&ids[2]));
        assert_eq!(texts(&list), ["A", "B", "C"]);
        assert_eq!(list.store().writes(), writes);
    }

    #[test]
    fn end_move_forgets_the_grab() {
        let (mut list, ids) = list_of(&["A", "B"]);
        list.begin_move(&ids[0]);
        list.end_move();
        assert!(!list.complete_move(&ids[1]));
        assert_eq!(texts(&list), ["A", "B"]);
    }

    #[test]
    fn move_entry_by_index() {
        let (mut list, _) = list_of(&["A", "B", "C", "D"]);
        assert!(list.move_entry(3, 1));
        assert_eq!(texts(&list), ["A", "D", "B", "C"]);
        assert!(list.move_entry(0, 99));
        assert_eq!(texts(&list), ["D", "B", "C", "A"]);
        assert!(!list.move_entry(7, 0));
        assert!(!list.move_entry(2, 2));
    }

    #[test]
    fn state_survives_reload_without_edit_state() {
        let (mut list, ids) = list_of(&["A", "B", "C"]);
        list.toggle_complete(&ids[1]);
        list.begin_move(&ids[0]);
        list.complete_move(&ids[2]);
        list.begin_edit(&ids[1]);
        let before = list.entries().to_vec();

        let reloaded = StreamList::load(list.into_store());
        assert_eq!(reloaded.entries(), &before[..]);
        assert!(reloaded.editing().is_none());
        assert!(reloaded.rows().iter().all(|row| !row.is_editing()));
    }

    #[test]
    fn edits_and_deletes_survive_reload() {
        let (mut list, ids) = list_of(&["A", "B"]);
        list.begin_edit(&ids[0]);
        list.update_draft(&ids[0], "  A2 ");
        list.save_edit(&ids[0]);
        list.delete(&ids[1]);

        let reloaded = StreamList::load(list.into_store());
        assert_eq!(texts(&reloaded), ["A2"]);
    }

    #[test]
    fn cancel_edit_writes_to_store() {
        let (mut list, ids) = list_of(&["A"]);
        list.begin_edit(&ids[0]);
        let writes = list.store().writes();
        list.cancel_edit(&ids[0]);
        assert_eq!(list.store().writes(), writes + 1);
    }

    #[test]
    fn corrupted_data_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        assert!(StreamList::load(store).is_empty());
    }

    #[test]
    fn duplicate_ids_are_dropped_on_load() {
        let mut store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"[{"id":"1","text":"A","complete":false},{"id":"1","text":"B","complete":false}]"#,
            )
            .unwrap();
        let list = StreamList::load(store);
        assert_eq!(texts(&list), ["A"]);
    }

    #[test]
    fn broken_store_never_fails_operations() {
        let mut list = StreamList::load(BrokenStore);
        let id = list.append("Dune").unwrap();
        assert!(list.toggle_complete(&id));
        assert!(list.get(&id).unwrap().complete);
        assert!(list.delete(&id));
        assert!(list.is_empty());
    }
}
