use crate::editing::{
    BlockDescriptor, BlockKind, Cmd, EditError, Editor, MarkKind, Patch, Selection, Value,
};
use crate::image::{DataUrl, ImageError, ImageTicket};
use crate::input::{self, KeyPress};
use crate::io::{self, ContentStore, StoreError};
use crate::policy::{
    BlockLimit, BlockLimitGate, GateDecision, GateInput, NestingOutcome, Notice, ToolbarState,
    list_nesting, toggle,
};
use crate::render::Snapshot;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Block count {count} is over the limit of {limit}")]
    OverLimit { count: usize, limit: usize },
}

/// What happened to a key press. Anything but `Ignored` means the UI must
/// prevent the platform's default handling.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Blocked by the block limit; the document is unchanged
    Suppressed,
    Handled(Patch),
    /// Not an editing key
    Ignored,
}

impl KeyOutcome {
    pub fn prevents_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    Inserted(Patch),
    /// The document reached the limit while the file was being read
    Blocked(Notice),
    /// The read failed or the ticket was not issued by this session
    Dropped,
}

/// One editor instance: the current value, the block limit and the store
/// it saves to.
///
/// All UI events go through here. The session applies the block-limit gate
/// and the list-nesting rules before anything reaches the [`Editor`].
pub struct EditorSession<S: ContentStore> {
    store: S,
    editor: Editor,
    limit: BlockLimit,
    notice: Option<Notice>,
    next_ticket: u64,
    in_flight: Vec<ImageTicket>,
    last_loaded_image: Option<DataUrl>,
}

impl<S: ContentStore> EditorSession<S> {
    /// Load the saved document (or the initial one) from `store`
    pub fn new(store: S, limit: BlockLimit) -> Result<Self, StoreError> {
        let value = io::load_content(&store)?;
        Ok(Self::with_value(store, value, limit))
    }

    /// Like [`EditorSession::new`], but starts from the initial value when
    /// the stored content cannot be loaded
    pub fn open(store: S, limit: BlockLimit) -> Self {
        let value = io::load_content(&store).unwrap_or_else(|e| {
            log::error!("Failed to load saved content, starting fresh: {e}");
            Value::initial()
        });
        Self::with_value(store, value, limit)
    }

    pub fn with_value(store: S, value: Value, limit: BlockLimit) -> Self {
        Self {
            store,
            editor: Editor::new(value),
            limit,
            notice: None,
            next_ticket: 0,
            in_flight: Vec::new(),
            last_loaded_image: None,
        }
    }

    pub fn value(&self) -> &Value {
        self.editor.value()
    }

    pub fn version(&self) -> u64 {
        self.editor.version()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn block_limit(&self) -> BlockLimit {
        self.limit
    }

    pub fn block_count(&self) -> usize {
        self.value().block_count()
    }

    pub fn list_scope_block_count(&self) -> usize {
        self.value().list_scope_block_count()
    }

    pub fn save_enabled(&self) -> bool {
        BlockLimitGate::save_enabled(self.block_count(), self.limit)
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn last_loaded_image(&self) -> Option<&DataUrl> {
        self.last_loaded_image.as_ref()
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        ToolbarState::from_value(self.value(), self.limit)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_value(self.value(), self.version())
    }

    /// Gate, then list nesting, then mark hotkeys, then default editing
    pub fn key_down(&mut self, press: &KeyPress) -> KeyOutcome {
        let decision = BlockLimitGate::evaluate(
            self.block_count(),
            self.limit,
            GateInput::Keystroke(press),
        );
        if !decision.is_allowed() {
            return KeyOutcome::Suppressed;
        }

        // A nesting edit that lets the default run still counts as handled
        let mut nested = None;
        match list_nesting::handle_key(press, self.value()) {
            NestingOutcome::Apply {
                suppress_default,
                commands,
            } => {
                let patch = self.apply_all(commands);
                if suppress_default {
                    return patch.map_or(KeyOutcome::Ignored, KeyOutcome::Handled);
                }
                nested = patch;
            }
            NestingOutcome::Deferred | NestingOutcome::Inert => {}
        }

        let patch = match input::mark_hotkey(press) {
            Some(mark) => self.apply_all(toggle::toggle_mark_commands(&mark)),
            None => input::default_action(press).and_then(|cmd| self.apply_all([cmd])),
        };
        patch
            .or(nested)
            .map_or(KeyOutcome::Ignored, KeyOutcome::Handled)
    }

    pub fn click_mark(&mut self, mark: &MarkKind) -> Option<Patch> {
        self.apply_all(toggle::toggle_mark_commands(mark))
    }

    pub fn click_block(&mut self, kind: &BlockKind) -> Option<Patch> {
        let commands = toggle::toggle_block_commands(self.value(), kind);
        self.apply_all(commands)
    }

    pub fn select(&mut self, selection: Selection) -> Result<Patch, EditError> {
        self.editor.apply(Cmd::Select(selection))
    }

    /// Change handler of the numeric limit input
    pub fn set_block_limit_input(&mut self, input: &str) {
        self.set_block_limit(BlockLimit::parse_input(input));
    }

    pub fn set_block_limit(&mut self, limit: BlockLimit) {
        log::debug!("block limit set to {limit}");
        self.limit = limit;
    }

    /// Ask to start reading an image file. Refused with a notice when the
    /// document is already at the block limit.
    pub fn begin_image_insert(&mut self) -> Result<ImageTicket, Notice> {
        self.gate_image()?;
        let ticket = ImageTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight.push(ticket);
        Ok(ticket)
    }

    /// Deliver a finished image read. The gate is checked again because
    /// the document may have grown while the file was read.
    pub fn complete_image_insert(
        &mut self,
        ticket: ImageTicket,
        result: Result<DataUrl, ImageError>,
    ) -> ImageOutcome {
        let Some(index) = self.in_flight.iter().position(|t| *t == ticket) else {
            log::warn!("Ignoring image read for unknown ticket {}", ticket.id());
            return ImageOutcome::Dropped;
        };
        self.in_flight.remove(index);

        let url = match result {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Image insert failed: {e}");
                return ImageOutcome::Dropped;
            }
        };
        self.last_loaded_image = Some(url.clone());

        if let Err(notice) = self.gate_image() {
            return ImageOutcome::Blocked(notice);
        }
        let cmd = Cmd::InsertBlock(BlockDescriptor::image(url.into_string()));
        self.apply_all([cmd])
            .map_or(ImageOutcome::Dropped, ImageOutcome::Inserted)
    }

    /// Persist the current document; refused while over the limit
    pub fn save(&mut self) -> Result<(), SessionError> {
        let count = self.block_count();
        if let Some(limit) = self.limit.get()
            && !self.save_enabled()
        {
            return Err(SessionError::OverLimit { count, limit });
        }
        io::save_content(&self.store, self.value())?;
        Ok(())
    }

    /// Drop unsaved edits and reload the last saved document
    pub fn cancel(&mut self) -> Result<Patch, StoreError> {
        let value = io::load_content(&self.store)?;
        log::info!("Discarded unsaved edits");
        self.notice = None;
        Ok(self.editor.replace(value))
    }

    fn gate_image(&mut self) -> Result<(), Notice> {
        match BlockLimitGate::evaluate(self.block_count(), self.limit, GateInput::ImageInsert) {
            GateDecision::Allow => Ok(()),
            GateDecision::SuppressWithNotice(notice) => {
                self.notice = Some(notice);
                Err(notice)
            }
            GateDecision::Suppress => Err(Notice::BlockLimitExceeded),
        }
    }

    fn apply_all(&mut self, commands: impl IntoIterator<Item = Cmd>) -> Option<Patch> {
        match self.editor.apply_all(commands) {
            Ok(patch) => Some(patch),
            Err(e) => {
                log::warn!("Edit rejected: {e}");
                None
            }
        }
    }
}
