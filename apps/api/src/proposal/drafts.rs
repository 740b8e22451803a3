//! In-memory, session-scoped draft store.
//!
//! Drafts are edited serially by a single user, so a plain `RwLock` map is
//! the whole persistence story: nothing survives the process.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use super::models::ProposalDraft;

#[derive(Clone, Default)]
pub struct DraftStore {
    inner: Arc<RwLock<HashMap<Uuid, ProposalDraft>>>,
}

impl DraftStore {
    pub fn insert(&self, draft: ProposalDraft) {
        self.inner
            .write()
            .expect("draft store lock poisoned")
            .insert(draft.id, draft);
    }

    pub fn get(&self, id: &Uuid) -> Option<ProposalDraft> {
        self.inner
            .read()
            .expect("draft store lock poisoned")
            .get(id)
            .cloned()
    }

    /// Applies `f` to the stored draft and returns the updated copy.
    pub fn update<F>(&self, id: &Uuid, f: F) -> Option<ProposalDraft>
    where
        F: FnOnce(&mut ProposalDraft),
    {
        let mut map = self.inner.write().expect("draft store lock poisoned");
        let draft = map.get_mut(id)?;
        f(draft);
        Some(draft.clone())
    }

    pub fn remove(&self, id: &Uuid) -> Option<ProposalDraft> {
        self.inner
            .write()
            .expect("draft store lock poisoned")
            .remove(id)
    }
}
