use crate::{
    data::student::{DraftMode, FieldErrors, StudentDraft, StudentRecord},
    gateway::{GatewayError, StudentGateway},
};
use uuid::Uuid;

/// What one create-or-edit interaction is doing.
#[derive(Debug, Clone)]
pub enum EditorMode {
    Create,
    Edit(StudentRecord),
}

#[derive(Debug, Clone, Default)]
enum EditorState {
    #[default]
    Closed,
    Open {
        mode: EditorMode,
        draft: StudentDraft,
        field_errors: FieldErrors,
        gateway_error: Option<String>,
    },
    Submitting {
        mode: EditorMode,
        draft: StudentDraft,
    },
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Persisted; the session has closed and the stored record should go into
    /// the roster (front for create, replace for edit).
    Saved(StudentRecord),
    /// Validation failed; the session stays open with the field errors attached.
    Invalid,
    /// The gateway refused; the session stays open with the draft intact and a
    /// top-level message attached.
    Failed,
    /// Nothing to do: the session was closed or already submitting.
    NotOpen,
}

/// Drives one record through draft → validation → gateway → stored. The
/// validator must fully pass before any gateway call is attempted, and a
/// failed call hands the untouched draft back for another try.
#[derive(Debug)]
pub struct EditorSession<G> {
    gateway: G,
    state: EditorState,
}

impl<G: StudentGateway> EditorSession<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: EditorState::Closed,
        }
    }

    /// Opens with an empty draft (status active, enrollment date today).
    /// Any previous draft or error state is discarded.
    pub fn open_for_create(&mut self) {
        self.state = EditorState::Open {
            mode: EditorMode::Create,
            draft: StudentDraft::for_create(),
            field_errors: FieldErrors::default(),
            gateway_error: None,
        };
    }

    /// Opens prefilled from an existing record. Any previous draft or error
    /// state is discarded.
    pub fn open_for_edit(&mut self, record: StudentRecord) {
        self.state = EditorState::Open {
            mode: EditorMode::Edit(record.clone()),
            draft: StudentDraft::from_record(&record),
            field_errors: FieldErrors::default(),
            gateway_error: None,
        };
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Open { .. })
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.state, EditorState::Closed)
    }

    pub fn draft(&self) -> Option<&StudentDraft> {
        match &self.state {
            EditorState::Open { draft, .. } | EditorState::Submitting { draft, .. } => Some(draft),
            EditorState::Closed => None,
        }
    }

    pub fn mode(&self) -> Option<&EditorMode> {
        match &self.state {
            EditorState::Open { mode, .. } | EditorState::Submitting { mode, .. } => Some(mode),
            EditorState::Closed => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match &self.state {
            EditorState::Open { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    pub fn gateway_error(&self) -> Option<&str> {
        match &self.state {
            EditorState::Open { gateway_error, .. } => gateway_error.as_deref(),
            _ => None,
        }
    }

    /// Replaces the in-progress draft with the user's edited values. Ignored
    /// unless the session is open.
    pub fn set_draft(&mut self, new_draft: StudentDraft) {
        if let EditorState::Open { draft, .. } = &mut self.state {
            *draft = new_draft;
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let (mode, draft) = match std::mem::take(&mut self.state) {
            EditorState::Open { mode, draft, .. } => (mode, draft),
            other => {
                // closed, or a submit is already in flight
                self.state = other;
                return SubmitOutcome::NotOpen;
            }
        };

        let draft_mode = match &mode {
            EditorMode::Create => DraftMode::Create,
            EditorMode::Edit(_) => DraftMode::Edit,
        };
        let input = match draft.validate(draft_mode) {
            Ok(input) => input,
            Err(field_errors) => {
                self.state = EditorState::Open {
                    mode,
                    draft,
                    field_errors,
                    gateway_error: None,
                };
                return SubmitOutcome::Invalid;
            }
        };

        self.state = EditorState::Submitting {
            mode: mode.clone(),
            draft: draft.clone(),
        };
        let result = match &mode {
            EditorMode::Create => self.gateway.insert(&input).await,
            EditorMode::Edit(record) => self.gateway.update(record.id, &input).await,
        };

        match result {
            Ok(stored) => {
                self.state = EditorState::Closed;
                SubmitOutcome::Saved(stored)
            }
            Err(error) => {
                warn!(%error, "gateway rejected submit");
                self.state = EditorState::Open {
                    mode,
                    draft,
                    field_errors: FieldErrors::default(),
                    gateway_error: Some(error.to_string()),
                };
                SubmitOutcome::Failed
            }
        }
    }
}

/// One-shot delete, gated by the confirmation prompt. Returns `Ok(false)` and
/// makes no gateway call when the prompt is declined.
pub async fn confirm_and_delete<G: StudentGateway>(
    gateway: &G,
    id: Uuid,
    confirm: impl FnOnce() -> bool,
) -> Result<bool, GatewayError> {
    if !confirm() {
        return Ok(false);
    }
    gateway.delete(id).await?;
    Ok(true)
}
