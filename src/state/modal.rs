use super::data::{Project, ProjectId};

/// Detail modal visibility
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    open: Option<ProjectId>,
}

impl ModalState {
    /// Open the modal for `id`. Unknown ids leave the state untouched.
    pub fn open(&mut self, id: &ProjectId, projects: &[Project]) -> bool {
        if projects.iter().any(|p| &p.id == id) {
            self.open = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Close (Escape, backdrop click or close button)
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The page beneath does not scroll while the modal is shown
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn current<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        let id = self.open.as_ref()?;
        projects.iter().find(|p| &p.id == id)
    }
}
