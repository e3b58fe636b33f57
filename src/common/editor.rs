// src/common/editor.rs

//! O "modal" de edição como máquina de estados.
//!
//! Só existe um estado por vez, então combinações ilegais (editar e excluir ao
//! mesmo tempo) não são representáveis. Cancelar nunca produz um [`Commit`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{common::error::AppError, db::store::Record};

pub trait Editable: Record {
    /// Cópia rasa dos campos editáveis.
    type Form: Clone + Send + Sync;

    fn to_form(&self) -> Self::Form;

    /// Produz o registro atualizado; o original não é tocado.
    fn apply_form(&self, form: Self::Form, now: DateTime<Utc>) -> Result<Self, AppError>;
}

pub enum Editor<T: Editable> {
    Closed,
    Viewing(T),
    Creating(T::Form),
    Editing { record: T, draft: T::Form },
    ConfirmingDelete(T),
}

/// Mudança a ser aplicada no store ao confirmar o modal.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit<T> {
    Insert(T),
    Replace(T),
    Remove(Uuid),
}

impl<T: Editable> Default for Editor<T> {
    fn default() -> Self {
        Editor::Closed
    }
}

impl<T: Editable> Editor<T> {
    pub fn state_name(&self) -> &'static str {
        match self {
            Editor::Closed => "closed",
            Editor::Viewing(_) => "viewing",
            Editor::Creating(_) => "creating",
            Editor::Editing { .. } => "editing",
            Editor::ConfirmingDelete(_) => "confirming_delete",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Editor::Closed)
    }

    // Só se abre um novo modal a partir de "fechado" ou "visualizando".
    fn ensure_idle(&self, action: &str) -> Result<(), AppError> {
        match self {
            Editor::Closed | Editor::Viewing(_) => Ok(()),
            other => Err(AppError::InvalidTransition(format!(
                "cannot {} while {}",
                action,
                other.state_name()
            ))),
        }
    }

    pub fn open_view(self, record: T) -> Result<Self, AppError> {
        self.ensure_idle("view")?;
        Ok(Editor::Viewing(record))
    }

    /// Botão "Modifier" do modal de detalhes: passa a editar o registro exibido.
    pub fn edit_viewed(self) -> Result<Self, AppError> {
        match self {
            Editor::Viewing(record) => Editor::Closed.open_edit(record),
            other => Err(AppError::InvalidTransition(format!(
                "nothing to edit while {}",
                other.state_name()
            ))),
        }
    }

    pub fn open_create(self, form: T::Form) -> Result<Self, AppError> {
        self.ensure_idle("create")?;
        Ok(Editor::Creating(form))
    }

    pub fn open_edit(self, record: T) -> Result<Self, AppError> {
        self.ensure_idle("edit")?;
        let draft = record.to_form();
        Ok(Editor::Editing { record, draft })
    }

    pub fn confirm_delete(self, record: T) -> Result<Self, AppError> {
        self.ensure_idle("delete")?;
        Ok(Editor::ConfirmingDelete(record))
    }

    pub fn draft(&self) -> Option<&T::Form> {
        match self {
            Editor::Creating(form) => Some(form),
            Editor::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut T::Form> {
        match self {
            Editor::Creating(form) => Some(form),
            Editor::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn set_draft(&mut self, form: T::Form) -> Result<(), AppError> {
        let state = self.state_name();
        let slot = self
            .draft_mut()
            .ok_or_else(|| AppError::InvalidTransition(format!("no draft while {}", state)))?;
        *slot = form;
        Ok(())
    }

    /// Descarta o rascunho sem efeito colateral.
    pub fn cancel(self) -> Self {
        Editor::Closed
    }

    pub fn submit(self, now: DateTime<Utc>) -> Result<Commit<T>, AppError> {
        self.submit_with(now, |_| {
            Err(AppError::InvalidTransition("creation requires a constructor".into()))
        })
    }

    pub fn submit_with<F>(self, now: DateTime<Utc>, create: F) -> Result<Commit<T>, AppError>
    where
        F: FnOnce(T::Form) -> Result<T, AppError>,
    {
        match self {
            Editor::Creating(form) => Ok(Commit::Insert(create(form)?)),
            Editor::Editing { record, draft } => Ok(Commit::Replace(record.apply_form(draft, now)?)),
            Editor::ConfirmingDelete(record) => Ok(Commit::Remove(record.id())),
            other => Err(AppError::InvalidTransition(format!(
                "nothing to submit while {}",
                other.state_name()
            ))),
        }
    }
}
