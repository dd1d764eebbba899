use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::{
    domain::FieldDraft,
    form::{FormAction, FormController, FormOutcome, text::handle_text_edit},
    presentation::{self, UiContext},
    store::Slot,
    submit::{SubmissionWorker, SubmitOutcome, Transport},
};

use super::{
    focus::FocusField,
    input::{CommandDispatch, InputRouter, KeyAction},
    options::BuilderOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

const DEFAULT_TITLE: &str = "Field Builder";

pub(crate) struct App<S: Slot> {
    controller: FormController<S>,
    worker: SubmissionWorker,
    options: BuilderOptions,
    input_router: InputRouter,
    status: StatusLine,
    title: String,
    focus: FocusField,
    in_flight: Option<FieldDraft>,
    delivered: Option<FieldDraft>,
    exit_armed: bool,
    should_quit: bool,
    tick: usize,
}

impl<S: Slot> App<S> {
    pub fn new(
        controller: FormController<S>,
        transport: Arc<dyn Transport>,
        options: BuilderOptions,
    ) -> Self {
        let input_router = InputRouter::new(options.keymap_store.clone());
        Self {
            controller,
            worker: SubmissionWorker::spawn(transport),
            options,
            input_router,
            status: StatusLine::new(),
            title: DEFAULT_TITLE.to_string(),
            focus: FocusField::Label,
            in_flight: None,
            delivered: None,
            exit_armed: false,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn run(&mut self) -> Result<Option<FieldDraft>> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            self.drain_submissions();
            terminal.draw(|frame| self.draw(frame))?;
            self.tick = self.tick.wrapping_add(1);
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(&text),
                Event::Resize(_, _) => terminal.autoresize()?,
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
            }
        }
        if self.in_flight.is_some() {
            log::warn!("quitting with a submission still in flight");
        }
        Ok(self.delivered.take())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = if self.options.show_help {
            self.input_router.help_text(self.focus)
        } else {
            None
        };
        presentation::draw(
            frame,
            UiContext {
                title: &self.title,
                draft: self.controller.draft(),
                validation: self.controller.validation(),
                editor: self.controller.editor(),
                focus: self.focus,
                submitting: self.controller.is_submitting(),
                status_message: self.status.message(),
                help: help.as_deref(),
                tick: self.tick,
            },
        );
    }

    fn drain_submissions(&mut self) {
        while let Some(outcome) = self.worker.poll() {
            self.finish_submission(outcome);
        }
    }

    fn finish_submission(&mut self, outcome: SubmitOutcome) {
        let in_flight = self.in_flight.take();
        if let FormOutcome::Delivered(_) = self
            .controller
            .dispatch(FormAction::SubmissionFinished(outcome))
        {
            self.delivered = in_flight;
        }
        self.exit_armed = false;
        self.status.ready();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_router.classify(&key, self.focus) {
            CommandDispatch::Action(action) => self.handle_action(action),
            CommandDispatch::Input(key) => self.handle_field_input(&key),
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        if action != KeyAction::Quit {
            self.exit_armed = false;
        }
        match action {
            KeyAction::Submit => self.on_submit(),
            KeyAction::Reset => {
                self.controller.dispatch(FormAction::Reset);
                self.status.reset();
            }
            KeyAction::Quit => self.on_exit(),
            KeyAction::FieldStep(delta) => self.move_focus(delta),
            KeyAction::Toggle => self.toggle_focused(),
            KeyAction::ConfirmDefault => {
                self.controller.dispatch(FormAction::ConfirmDefault);
            }
        }
    }

    fn move_focus(&mut self, delta: i32) {
        let leaving = self.focus;
        self.focus = self.focus.step(delta);
        if leaving == FocusField::DefaultValue && self.focus != leaving {
            self.controller.dispatch(FormAction::ConfirmDefault);
        }
    }

    fn toggle_focused(&mut self) {
        let draft = self.controller.draft();
        let action = match self.focus {
            FocusField::Required => FormAction::SetRequired(!draft.required),
            FocusField::DisplayAlpha => FormAction::SetDisplayAlpha(!draft.display_alpha),
            _ => return,
        };
        self.controller.dispatch(action);
        self.status.editing(self.focus.title());
    }

    fn handle_field_input(&mut self, key: &KeyEvent) {
        let action = match self.focus {
            FocusField::Label => {
                let mut label = self.controller.draft().label.clone();
                handle_text_edit(&mut label, key).then(|| FormAction::SetLabel(label))
            }
            FocusField::DefaultValue => {
                let mut default = self.controller.draft().default.clone();
                handle_text_edit(&mut default, key).then(|| FormAction::SetDefault(default))
            }
            FocusField::Choices => {
                let editor = self.controller.editor_mut();
                editor
                    .handle_key(key)
                    .then(|| FormAction::SetChoices(editor.lines().to_vec()))
            }
            FocusField::Required | FocusField::DisplayAlpha => None,
        };
        if let Some(action) = action {
            self.exit_armed = false;
            self.controller.dispatch(action);
            self.status.editing(self.focus.title());
        }
    }

    fn handle_paste(&mut self, text: &str) {
        let action = match self.focus {
            FocusField::Label => {
                let label = format!("{}{}", self.controller.draft().label, single_line(text));
                FormAction::SetLabel(label)
            }
            FocusField::DefaultValue => {
                let default = format!("{}{}", self.controller.draft().default, single_line(text));
                FormAction::SetDefault(default)
            }
            FocusField::Choices => {
                let editor = self.controller.editor_mut();
                for ch in text.chars().filter(|ch| *ch != '\r') {
                    if ch == '\n' {
                        editor.insert_newline();
                    } else {
                        editor.insert_char(ch);
                    }
                }
                FormAction::SetChoices(editor.lines().to_vec())
            }
            FocusField::Required | FocusField::DisplayAlpha => return,
        };
        self.controller.dispatch(action);
        self.status.editing(self.focus.title());
    }

    fn on_submit(&mut self) {
        if self.focus == FocusField::DefaultValue {
            self.controller.dispatch(FormAction::ConfirmDefault);
        }
        match self.controller.dispatch(FormAction::Submit) {
            FormOutcome::Blocked(state) => self.status.issues_remaining(state.issue_count()),
            FormOutcome::Transmit(value) => {
                self.worker.send(value.clone());
                self.in_flight = Some(value);
                self.status.submitting();
            }
            FormOutcome::Busy => self.status.already_submitting(),
            _ => {}
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.controller.is_submitting() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}

fn single_line(text: &str) -> String {
    text.chars().filter(|ch| *ch != '\n' && *ch != '\r').collect()
}
