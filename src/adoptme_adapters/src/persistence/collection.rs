use adoptme_core::{Document, StoreError};

/// Insertion-ordered documents of one kind, with unique fields checked on every write.
#[derive(Debug, Clone)]
pub struct Collection<D> {
    docs: Vec<D>,
}

impl<D> Default for Collection<D> {
    fn default() -> Self {
        Self { docs: Vec::new() }
    }
}

impl<D: Document> Collection<D> {
    pub fn insert(&mut self, draft: D::Draft) -> Result<D, StoreError> {
        let doc = D::from_draft(D::generate_id(), draft);
        self.check_unique(&doc)?;
        self.docs.push(doc.clone());
        Ok(doc)
    }

    pub fn find(&self, filter: &D::Filter) -> Option<&D> {
        self.docs.iter().find(|doc| doc.matches(filter))
    }

    pub fn get(&self, id: &D::Id) -> Option<&D> {
        self.docs.iter().find(|doc| doc.id() == id)
    }

    pub fn get_mut(&mut self, id: &D::Id) -> Option<&mut D> {
        self.docs.iter_mut().find(|doc| doc.id() == id)
    }

    pub fn all(&self) -> Vec<D> {
        self.docs.clone()
    }

    pub fn push(&mut self, doc: D) {
        self.docs.push(doc);
    }

    /// Applies `patch` to a copy first so a unique-key conflict leaves the stored document untouched.
    pub fn update(&mut self, id: &D::Id, patch: D::Patch) -> Result<Option<D>, StoreError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut updated = self.docs[index].clone();
        updated.apply(patch);
        self.check_unique(&updated)?;

        self.docs[index] = updated.clone();
        Ok(Some(updated))
    }

    pub fn remove(&mut self, id: &D::Id) -> Option<D> {
        let index = self.position(id)?;
        Some(self.docs.remove(index))
    }

    pub fn clear(&mut self) {
        self.docs.clear();
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn position(&self, id: &D::Id) -> Option<usize> {
        self.docs.iter().position(|doc| doc.id() == id)
    }

    fn check_unique(&self, candidate: &D) -> Result<(), StoreError> {
        match self
            .docs
            .iter()
            .find_map(|doc| doc.unique_conflict(candidate))
        {
            Some(field) => Err(StoreError::DuplicateKey {
                collection: D::COLLECTION,
                field,
            }),
            None => Ok(()),
        }
    }
}
