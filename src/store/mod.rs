//! Draft persistence under a single named key.

mod slot;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::domain::{DRAFT_KEY, FieldDraft};

pub use slot::{FileSlot, MemorySlot, Slot, default_data_dir};

#[derive(Debug)]
pub struct DraftStore<S: Slot> {
    slot: S,
    key: String,
}

impl<S: Slot> DraftStore<S> {
    pub fn new(slot: S) -> Self {
        Self::with_key(slot, DRAFT_KEY)
    }

    pub fn with_key(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Overwrites the stored draft. Failures are logged and swallowed.
    pub fn save(&self, draft: &FieldDraft) {
        let result = serde_json::to_string(draft)
            .context("failed to encode draft")
            .and_then(|encoded| self.slot.write(&self.key, &encoded));
        if let Err(err) = result {
            log::warn!("could not persist draft under '{}': {err:#}", self.key);
        }
    }

    /// Reads the stored draft, overlaid on the default record.
    ///
    /// A record that cannot be decoded is discarded so the next load starts
    /// clean.
    pub fn load(&self) -> Option<FieldDraft> {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("could not read draft under '{}': {err:#}", self.key);
                return None;
            }
        };
        match decode_draft(&raw) {
            Ok(draft) => Some(draft),
            Err(err) => {
                log::error!("discarding stored draft '{}': {err:#}", self.key);
                self.clear();
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.slot.remove(&self.key) {
            log::warn!("could not clear draft under '{}': {err:#}", self.key);
        }
    }
}

/// Decodes a stored record, filling every missing field from the defaults.
pub fn decode_draft(raw: &str) -> Result<FieldDraft> {
    let stored: Value = serde_json::from_str(raw).context("stored draft is not valid JSON")?;
    let Value::Object(stored) = stored else {
        return Err(anyhow!("stored draft is not a JSON object"));
    };
    let mut merged = serde_json::to_value(FieldDraft::default())?;
    if let Value::Object(base) = &mut merged {
        for (key, value) in stored {
            base.insert(key, value);
        }
    }
    serde_json::from_value(merged).context("stored draft has fields of the wrong type")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(raw: &str) -> DraftStore<MemorySlot> {
        DraftStore::new(MemorySlot::with_entry(DRAFT_KEY, raw))
    }

    #[test]
    fn missing_key_loads_nothing() {
        let store = DraftStore::new(MemorySlot::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_then_load_returns_draft() {
        let store = DraftStore::new(MemorySlot::new());
        let draft = FieldDraft {
            label: "Sales region".into(),
            required: true,
            choices: vec!["Asia".into(), "Europe".into()],
            display_alpha: true,
            default: "Asia".into(),
        };
        store.save(&draft);
        assert_eq!(store.load(), Some(draft));
    }

    #[test]
    fn partial_record_is_filled_from_defaults() {
        let store = store_with(r#"{"label":"Color"}"#);
        let draft = store.load().expect("draft");
        assert_eq!(
            draft,
            FieldDraft {
                label: "Color".into(),
                ..Default::default()
            }
        );

        let store = store_with("{}");
        assert_eq!(store.load(), Some(FieldDraft::default()));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let store = store_with(r#"{"displayAlpha":true,"legacy":42}"#);
        let draft = store.load().expect("draft");
        assert!(draft.display_alpha);
    }

    #[test]
    fn corrupt_record_is_purged() {
        for raw in ["{not json", "\"just a string\"", r#"{"choices":"oops"}"#, ""] {
            let store = store_with(raw);
            assert_eq!(store.load(), None, "input {raw:?}");
            assert!(!store.slot().contains(DRAFT_KEY), "input {raw:?}");
            assert_eq!(store.load(), None);
        }
    }

    #[test]
    fn undecodable_file_is_purged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{DRAFT_KEY}.json"));
        std::fs::write(&path, [0xff, 0xfe, b'{', 0x80]).unwrap();

        let store = DraftStore::new(FileSlot::new(dir.path()));
        assert_eq!(store.load(), None);
        assert!(!path.exists());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_erases_key() {
        let store = DraftStore::new(MemorySlot::new());
        store.save(&FieldDraft::default());
        assert!(store.slot().contains(DRAFT_KEY));
        store.clear();
        assert!(!store.slot().contains(DRAFT_KEY));
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let draft = FieldDraft {
            label: "Size".into(),
            choices: vec!["S".into(), "M".into()],
            ..Default::default()
        };
        DraftStore::new(FileSlot::new(dir.path())).save(&draft);
        let reopened = DraftStore::new(FileSlot::new(dir.path()));
        assert_eq!(reopened.load(), Some(draft));
    }
}
