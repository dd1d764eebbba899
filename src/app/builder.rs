use std::sync::Arc;

use anyhow::{Context, Result};

use crate::{
    domain::FieldDraft,
    form::FormController,
    store::{DraftStore, FileSlot, Slot},
    submit::HttpTransport,
};

use super::{options::BuilderOptions, runtime::App};

/// Entry point: configures and runs the field builder TUI.
pub struct FieldBuilder {
    title: Option<String>,
    options: BuilderOptions,
    slot: Option<Box<dyn Slot>>,
}

impl FieldBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            options: BuilderOptions::default(),
            slot: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    /// Overrides where the draft is persisted. Defaults to the platform data
    /// directory.
    pub fn with_slot(mut self, slot: impl Slot + 'static) -> Self {
        self.slot = Some(Box::new(slot));
        self
    }

    /// Runs until the user quits. Returns the last value delivered to the
    /// endpoint during the session, if any.
    pub fn run(self) -> Result<Option<FieldDraft>> {
        let FieldBuilder {
            title,
            options,
            slot,
        } = self;

        let slot = match slot {
            Some(slot) => slot,
            None => Box::new(FileSlot::in_data_dir().context("failed to locate draft storage")?),
        };
        let transport = HttpTransport::new(options.endpoint.clone())
            .context("failed to initialise HTTP client")?;
        let controller = FormController::open(DraftStore::new(slot), options.highlighting);

        let mut app = App::new(controller, Arc::new(transport), options);
        if let Some(title) = title {
            app.set_title(title);
        }
        app.run()
    }
}

impl Default for FieldBuilder {
    fn default() -> Self {
        Self::new()
    }
}
