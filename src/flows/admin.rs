//! Admin CRUD flow over the question bank.
//!
//! The local list is only changed after the server confirms a write.

use std::time::Instant;

use crate::error::{RequestError, ValidationError};
use crate::models::{QuestionDraft, QuestionUpdate, QuestionWithAnswer, OPTION_COUNT};

use super::notice::{self, Notice};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load questions. Please try again.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save question. Please try again.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete question. Please try again.";

/// Checks a draft before it is sent anywhere.
pub fn validate_draft(draft: &QuestionDraft) -> Result<(), ValidationError> {
    if draft.question_text.trim().is_empty() {
        return Err(ValidationError::EmptyQuestionText);
    }
    if let Some(index) = draft.options.iter().position(|o| o.trim().is_empty()) {
        return Err(ValidationError::EmptyOption(index));
    }
    if draft.correct_answer >= OPTION_COUNT {
        return Err(ValidationError::CorrectAnswerOutOfRange(draft.correct_answer));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Loaded,
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    QuestionText,
    Option(usize),
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::QuestionText => FormField::Option(0),
            FormField::Option(i) if i + 1 < OPTION_COUNT => FormField::Option(i + 1),
            FormField::Option(_) => FormField::QuestionText,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::QuestionText => FormField::Option(OPTION_COUNT - 1),
            FormField::Option(0) => FormField::QuestionText,
            FormField::Option(i) => FormField::Option(i - 1),
        }
    }
}

/// Editable contents of the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionForm {
    draft: QuestionDraft,
    focus: FormField,
    saving: bool,
}

impl QuestionForm {
    pub fn new(draft: QuestionDraft) -> Self {
        Self {
            draft,
            focus: FormField::QuestionText,
            saving: false,
        }
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    fn focused_text(&mut self) -> &mut String {
        match self.focus {
            FormField::QuestionText => &mut self.draft.question_text,
            FormField::Option(i) => &mut self.draft.options[i],
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.focused_text().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_text().pop();
    }

    /// Marks the focused option as the correct answer.
    pub fn mark_correct(&mut self) {
        if let FormField::Option(i) = self.focus {
            self.draft.correct_answer = i;
        }
    }

    #[cfg(test)]
    pub fn set_question_text(&mut self, text: impl Into<String>) {
        self.draft.question_text = text.into();
    }

    #[cfg(test)]
    pub fn set_option(&mut self, index: usize, text: impl Into<String>) {
        if let Some(option) = self.draft.options.get_mut(index) {
            *option = text.into();
        }
    }

    #[cfg(test)]
    pub fn set_correct_answer(&mut self, index: usize) {
        if index < OPTION_COUNT {
            self.draft.correct_answer = index;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Creating(QuestionForm),
    Editing {
        original: QuestionWithAnswer,
        form: QuestionForm,
    },
}

/// Write request produced by a valid form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(QuestionDraft),
    Update { id: i64, update: QuestionUpdate },
}

#[derive(Debug)]
pub struct AdminFlow {
    phase: ListPhase,
    questions: Vec<QuestionWithAnswer>,
    selected: usize,
    form: FormMode,
    pending_delete: Option<i64>,
    deleting: Option<i64>,
    notice: Option<Notice>,
}

impl Default for AdminFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminFlow {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
            questions: Vec::new(),
            selected: 0,
            form: FormMode::Closed,
            pending_delete: None,
            deleting: None,
            notice: None,
        }
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn questions(&self) -> &[QuestionWithAnswer] {
        &self.questions
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_question(&self) -> Option<&QuestionWithAnswer> {
        self.questions.get(self.selected)
    }

    pub fn form(&self) -> &FormMode {
        &self.form
    }

    pub fn form_mut(&mut self) -> Option<&mut QuestionForm> {
        match &mut self.form {
            FormMode::Closed => None,
            FormMode::Creating(form) | FormMode::Editing { form, .. } => Some(form),
        }
    }

    pub fn is_form_open(&self) -> bool {
        self.form != FormMode::Closed
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn deleting(&self) -> Option<i64> {
        self.deleting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn loaded(&mut self, questions: Vec<QuestionWithAnswer>) {
        tracing::info!(count = questions.len(), "admin questions loaded");
        self.questions = questions;
        self.selected = 0;
        self.phase = ListPhase::Loaded;
    }

    pub fn load_failed(&mut self, err: &RequestError) {
        tracing::warn!("loading admin questions failed: {}", err);
        self.phase = ListPhase::Failed {
            message: LOAD_FAILED_MESSAGE.to_string(),
        };
    }

    /// Returns true when a new load should be issued.
    pub fn retry(&mut self) -> bool {
        if matches!(self.phase, ListPhase::Failed { .. }) {
            self.phase = ListPhase::Loading;
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.questions.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_create(&mut self) {
        if !self.is_form_open() {
            self.form = FormMode::Creating(QuestionForm::new(QuestionDraft::default()));
        }
    }

    /// Opens the form pre-filled with the selected question.
    pub fn open_edit(&mut self) {
        if self.is_form_open() {
            return;
        }
        if let Some(original) = self.selected_question().cloned() {
            let form = QuestionForm::new(original.to_draft());
            self.form = FormMode::Editing { original, form };
        }
    }

    pub fn cancel_form(&mut self) {
        if self.form_mut().is_some_and(|f| f.is_saving()) {
            return;
        }
        self.form = FormMode::Closed;
    }

    /// Validates the open form and marks it as saving.
    ///
    /// Returns `None` when nothing should be sent: no form, a save already
    /// in flight, a validation failure, or an edit without changes.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        let (request, validation) = match &self.form {
            FormMode::Closed => return None,
            FormMode::Creating(form) | FormMode::Editing { form, .. } if form.saving => {
                return None;
            }
            FormMode::Creating(form) => (
                SaveRequest::Create(form.draft.clone()),
                validate_draft(&form.draft),
            ),
            FormMode::Editing { original, form } => (
                SaveRequest::Update {
                    id: original.id(),
                    update: QuestionUpdate::between(original, &form.draft),
                },
                validate_draft(&form.draft),
            ),
        };

        if let Err(e) = validation {
            self.notice = Some(Notice::validation(e.to_string()));
            return None;
        }

        if let SaveRequest::Update { update, .. } = &request {
            if update.is_empty() {
                self.form = FormMode::Closed;
                self.notice = Some(Notice::info("No changes to save."));
                return None;
            }
        }

        if let Some(form) = self.form_mut() {
            form.saving = true;
        }
        Some(request)
    }

    /// Applies the server's copy of a saved question and closes the form.
    pub fn save_succeeded(&mut self, record: QuestionWithAnswer) {
        match &self.form {
            FormMode::Creating(_) => {
                tracing::info!(id = record.id(), "question created");
                self.questions.push(record);
                self.selected = self.questions.len() - 1;
            }
            FormMode::Editing { original, .. } => {
                let id = original.id();
                tracing::info!(id, "question updated");
                if let Some(entry) = self.questions.iter_mut().find(|q| q.id() == id) {
                    *entry = record;
                }
            }
            FormMode::Closed => return,
        }
        self.form = FormMode::Closed;
    }

    /// Keeps the form open with its contents intact.
    pub fn save_failed(&mut self, err: &RequestError) {
        tracing::warn!("saving question failed: {}", err);
        if let Some(form) = self.form_mut() {
            form.saving = false;
        }
        self.notice = Some(Notice::error(SAVE_FAILED_MESSAGE));
    }

    /// Asks for confirmation before deleting the selected question.
    pub fn request_delete(&mut self) {
        if self.is_form_open() || self.deleting.is_some() {
            return;
        }
        self.pending_delete = self.selected_question().map(QuestionWithAnswer::id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Returns the id to delete once confirmed.
    pub fn confirm_delete(&mut self) -> Option<i64> {
        if self.deleting.is_some() {
            return None;
        }
        let id = self.pending_delete.take()?;
        self.deleting = Some(id);
        Some(id)
    }

    pub fn delete_succeeded(&mut self, id: i64) {
        tracing::info!(id, "question deleted");
        self.deleting = None;
        self.questions.retain(|q| q.id() != id);
        if self.selected >= self.questions.len() {
            self.selected = self.questions.len().saturating_sub(1);
        }
    }

    /// Leaves the list exactly as it was.
    pub fn delete_failed(&mut self, id: i64, err: &RequestError) {
        tracing::warn!(id, "deleting question failed: {}", err);
        self.deleting = None;
        self.notice = Some(Notice::error(DELETE_FAILED_MESSAGE));
    }

    pub fn tick(&mut self, now: Instant) {
        notice::expire(&mut self.notice, now);
    }
}
