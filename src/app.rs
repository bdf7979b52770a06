//! Screen navigation and input dispatch.
//!
//! `App` never performs I/O itself: key handling returns the [`Request`]
//! to run and completed requests come back through
//! [`App::handle_response`].

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::RequestError;
use crate::flows::{AdminFlow, FormField, ListPhase, ResultView, SaveRequest, TestFlow};
use crate::models::{Question, QuestionDraft, QuestionUpdate, QuestionWithAnswer, TestResult};
use crate::storage::ResultSlot;

/// Screen the app opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Start {
    #[default]
    Home,
    Test,
    Admin,
    Result,
}

/// Entries of the home menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    StartTest,
    AdminPanel,
    LastResult,
    Quit,
}

pub const MENU: [MenuItem; 4] = [
    MenuItem::StartTest,
    MenuItem::AdminPanel,
    MenuItem::LastResult,
    MenuItem::Quit,
];

#[derive(Debug)]
pub enum Screen {
    Home { selected: usize },
    Test(TestFlow),
    Result(ResultView),
    Admin(AdminFlow),
}

/// Network work requested by a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    LoadTestQuestions,
    SubmitTest(Vec<usize>),
    LoadAdminQuestions,
    CreateQuestion(QuestionDraft),
    UpdateQuestion { id: i64, update: QuestionUpdate },
    DeleteQuestion(i64),
}

/// Outcome of a [`Request`].
#[derive(Debug)]
pub enum Response {
    TestQuestions(Result<Vec<Question>, RequestError>),
    Submitted(Result<TestResult, RequestError>),
    AdminQuestions(Result<Vec<QuestionWithAnswer>, RequestError>),
    Saved(Result<QuestionWithAnswer, RequestError>),
    Deleted { id: i64, result: Result<(), RequestError> },
}

pub struct App {
    screen: Screen,
    slot: Box<dyn ResultSlot>,
    epoch: u64,
    should_quit: bool,
}

impl App {
    pub fn new(slot: Box<dyn ResultSlot>) -> Self {
        Self {
            screen: Screen::Home { selected: 0 },
            slot,
            epoch: 0,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Incremented on every navigation; responses from older epochs are stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn slot(&self) -> &dyn ResultSlot {
        self.slot.as_ref()
    }

    pub fn start(&mut self, start: Start) -> Option<Request> {
        match start {
            Start::Home => {
                self.go_home();
                None
            }
            Start::Test => Some(self.open_test()),
            Start::Admin => Some(self.open_admin()),
            Start::Result => {
                self.open_result();
                None
            }
        }
    }

    fn navigate(&mut self, screen: Screen) {
        self.epoch += 1;
        self.screen = screen;
    }

    pub fn go_home(&mut self) {
        self.navigate(Screen::Home { selected: 0 });
    }

    pub fn open_test(&mut self) -> Request {
        tracing::info!("opening test");
        self.navigate(Screen::Test(TestFlow::new()));
        Request::LoadTestQuestions
    }

    pub fn open_admin(&mut self) -> Request {
        tracing::info!("opening admin panel");
        self.navigate(Screen::Admin(AdminFlow::new()));
        Request::LoadAdminQuestions
    }

    /// Shows the stored result, or silently returns home when there is none.
    pub fn open_result(&mut self) {
        match ResultView::open(self.slot.as_ref()) {
            Ok(view) => self.navigate(Screen::Result(view)),
            Err(e) => {
                tracing::info!("{}; returning home", e);
                self.go_home();
            }
        }
    }

    /// Clears the stored result and starts a fresh attempt.
    pub fn retake(&mut self) -> Request {
        if let Err(e) = self.slot.clear() {
            tracing::warn!("could not clear stored result: {}", e);
        }
        self.open_test()
    }

    pub fn tick(&mut self, now: Instant) {
        match &mut self.screen {
            Screen::Test(flow) => flow.tick(now),
            Screen::Admin(flow) => flow.tick(now),
            Screen::Home { .. } | Screen::Result(_) => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Request> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.screen {
            Screen::Home { .. } => self.handle_home_key(key.code),
            Screen::Test(_) => self.handle_test_key(key.code),
            Screen::Result(_) => self.handle_result_key(key.code),
            Screen::Admin(_) => self.handle_admin_key(key),
        }
    }

    fn activate(&mut self, item: MenuItem) -> Option<Request> {
        match item {
            MenuItem::StartTest => Some(self.open_test()),
            MenuItem::AdminPanel => Some(self.open_admin()),
            MenuItem::LastResult => {
                self.open_result();
                None
            }
            MenuItem::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) -> Option<Request> {
        let Screen::Home { selected } = &mut self.screen else {
            return None;
        };

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                *selected = (*selected + MENU.len() - 1) % MENU.len();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *selected = (*selected + 1) % MENU.len();
                None
            }
            KeyCode::Enter => {
                let item = MENU[*selected];
                self.activate(item)
            }
            KeyCode::Char('t') => self.activate(MenuItem::StartTest),
            KeyCode::Char('a') => self.activate(MenuItem::AdminPanel),
            KeyCode::Char('v') => self.activate(MenuItem::LastResult),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.activate(MenuItem::Quit)
            }
            _ => None,
        }
    }

    fn handle_test_key(&mut self, key: KeyCode) -> Option<Request> {
        let Screen::Test(flow) = &mut self.screen else {
            return None;
        };

        match key {
            KeyCode::Esc | KeyCode::Char('b') => {
                self.go_home();
                None
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => flow.retry().then_some(Request::LoadTestQuestions),
            KeyCode::Up | KeyCode::Char('k') => {
                flow.previous_option();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                flow.next_option();
                None
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                flow.next_question();
                None
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                flow.previous_question();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                flow.choose_highlighted();
                None
            }
            KeyCode::Char(c @ '1'..='4') => {
                let option = c as usize - '1' as usize;
                flow.select(flow.cursor(), option);
                None
            }
            KeyCode::Char('s') => flow.begin_submit().map(Request::SubmitTest),
            _ => None,
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) -> Option<Request> {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(self.retake()),
            KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Esc => {
                self.go_home();
                None
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                None
            }
            _ => None,
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> Option<Request> {
        let Screen::Admin(flow) = &mut self.screen else {
            return None;
        };

        if let Some(form) = flow.form_mut() {
            match key.code {
                KeyCode::Esc => flow.cancel_form(),
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return flow.begin_save().map(|save| match save {
                        SaveRequest::Create(draft) => Request::CreateQuestion(draft),
                        SaveRequest::Update { id, update } => {
                            Request::UpdateQuestion { id, update }
                        }
                    });
                }
                KeyCode::Tab | KeyCode::Down => form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
                KeyCode::Enter => match form.focus() {
                    FormField::QuestionText => form.focus_next(),
                    FormField::Option(_) => form.mark_correct(),
                },
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    form.insert_char(c)
                }
                _ => {}
            }
            return None;
        }

        if flow.pending_delete().is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    return flow.confirm_delete().map(Request::DeleteQuestion);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => flow.cancel_delete(),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => {
                self.go_home();
                None
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => flow.retry().then_some(Request::LoadAdminQuestions),
            KeyCode::Up | KeyCode::Char('k') => {
                flow.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                flow.select_next();
                None
            }
            _ if flow.phase() != &ListPhase::Loaded => None,
            KeyCode::Char('n') => {
                flow.open_create();
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                flow.open_edit();
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                flow.request_delete();
                None
            }
            _ => None,
        }
    }

    /// Applies a completed request issued during `epoch`.
    ///
    /// A scored submission is always written to the slot, even when the
    /// user has already left the test; everything else from an older
    /// epoch is dropped.
    pub fn handle_response(&mut self, epoch: u64, response: Response) {
        let response = match response {
            Response::Submitted(Ok(score)) => {
                self.finish_submit(epoch, score);
                return;
            }
            other => other,
        };

        if epoch != self.epoch {
            tracing::debug!(epoch, current = self.epoch, "dropping stale response");
            return;
        }

        match (&mut self.screen, response) {
            (Screen::Test(flow), Response::TestQuestions(result)) => match result {
                Ok(questions) => flow.loaded(questions),
                Err(e) => flow.load_failed(&e),
            },
            (Screen::Test(flow), Response::Submitted(Err(e))) => flow.submit_failed(&e),
            (Screen::Admin(flow), Response::AdminQuestions(result)) => match result {
                Ok(questions) => flow.loaded(questions),
                Err(e) => flow.load_failed(&e),
            },
            (Screen::Admin(flow), Response::Saved(result)) => match result {
                Ok(record) => flow.save_succeeded(record),
                Err(e) => flow.save_failed(&e),
            },
            (Screen::Admin(flow), Response::Deleted { id, result }) => match result {
                Ok(()) => flow.delete_succeeded(id),
                Err(e) => flow.delete_failed(id, &e),
            },
            (_, response) => {
                tracing::debug!("response {:?} does not apply to the current screen", response);
            }
        }
    }

    fn finish_submit(&mut self, epoch: u64, score: TestResult) {
        tracing::info!(
            score = score.score,
            total = score.total,
            percentage = score.percentage,
            "test submitted"
        );
        let stored = self.slot.store(&score);
        if let Err(e) = &stored {
            tracing::warn!("could not store result: {}", e);
        }

        let waiting = epoch == self.epoch && matches!(self.screen, Screen::Test(_));
        if !waiting {
            tracing::debug!(epoch, current = self.epoch, "result stored after leaving the test");
            return;
        }
        if let Screen::Test(flow) = &mut self.screen {
            flow.submit_succeeded();
        }
        match stored {
            Ok(()) => self.open_result(),
            Err(_) => self.navigate(Screen::Result(ResultView::new(score))),
        }
    }
}
