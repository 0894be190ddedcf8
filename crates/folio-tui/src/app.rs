use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use folio_core::paging::{
    ControlKind, EventTarget, InputBinding, NavKey, Outcome, PagingController, PagingState,
    PassReason, SectionOrder, SettleTicket,
};
use folio_core::AppConfig;
use ratatui::layout::Rect;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::content::{section_content, SectionContent};
use crate::input::{handle_key_event, key_gesture, nav_key, wheel_gesture, Action};
use crate::keymap::Keymap;
use crate::surface::PageSurface;
use crate::theme::Theme;
use crate::timer::TokioSettleTimer;
use crate::widgets::navbar;

/// Screen split: navbar row, document, status/prompt row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub navbar: Rect,
    pub document: Rect,
    pub bottom: Rect,
}

impl ScreenLayout {
    pub fn split(area: Rect) -> Self {
        let navbar = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let bottom_height = area.height.saturating_sub(1).min(1);
        let document_height = area.height.saturating_sub(2);
        let document = Rect::new(area.x, area.y + navbar.height, area.width, document_height);
        let bottom = Rect::new(
            area.x,
            document.y + document_height,
            area.width,
            bottom_height,
        );
        Self {
            navbar,
            document,
            bottom,
        }
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub controller: PagingController<TokioSettleTimer>,
    pub surface: PageSurface,
    /// Section content in navigation order
    pub sections: Vec<SectionContent>,
    pub keymap: Keymap,
    /// Goto prompt text while the prompt is open
    pub prompt: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    pub last_outcome: Option<Outcome>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub screen: ScreenLayout,
    paging: watch::Receiver<PagingState>,
}

impl App {
    /// Build the app and the channel on which settle tickets arrive
    pub fn new(
        config: Arc<AppConfig>,
    ) -> folio_core::Result<(Self, mpsc::UnboundedReceiver<SettleTicket>)> {
        let order = SectionOrder::from_config(&config.paging.sections)?;
        let sections = order
            .iter()
            .map(|id| section_content(id.as_str(), &config.general.contact_email))
            .collect();
        let keymap = Keymap::from_config(&config.keymap, order.len());

        let (timer, settle_rx) = TokioSettleTimer::new();
        let controller = PagingController::new(order, &config.paging, timer);
        let paging = controller.subscribe();

        let app = Self {
            surface: PageSurface::new(&config.ui),
            theme: Theme::default(),
            controller,
            sections,
            keymap,
            prompt: None,
            pending_key: None,
            last_outcome: None,
            status_message: None,
            should_quit: false,
            screen: ScreenLayout::default(),
            paging,
            config,
        };
        Ok((app, settle_rx))
    }

    pub fn mount(&mut self, binding: &mut impl InputBinding) -> bool {
        let attached = self.controller.mount(binding);
        if !attached {
            self.set_status("Mouse capture unavailable, section paging off");
        }
        attached
    }

    pub fn unmount(&mut self, binding: &mut impl InputBinding) {
        self.controller.unmount(binding);
    }

    /// Re-lay the document for a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = ScreenLayout::split(Rect::new(0, 0, width, height));
        let doc = self.screen.document;
        self.surface.layout(&self.sections, doc.width, doc.height);
    }

    pub fn is_prompt_open(&self) -> bool {
        self.prompt.is_some()
    }

    /// Paging signal as seen by the overlay
    pub fn overlay_visible(&self) -> bool {
        *self.paging.borrow() == PagingState::Paging
    }

    pub fn active_index(&self) -> usize {
        self.controller.active_index(&self.surface)
    }

    pub fn scroll_offset_px(&self) -> f64 {
        self.surface.scroll_row() as f64 * self.surface.metrics().row_px
    }

    pub fn navbar_compact(&self) -> bool {
        self.scroll_offset_px() > self.config.ui.compact_navbar_after_px
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Target of keyboard gestures: the prompt when it has focus
    fn key_target(&self) -> EventTarget {
        if self.is_prompt_open() {
            EventTarget::Control(ControlKind::TextInput)
        } else {
            EventTarget::Document
        }
    }

    /// Target of a wheel event at `row`: the prompt row when it is open
    fn wheel_target(&self, row: u16) -> EventTarget {
        if self.is_prompt_open() && self.screen.bottom.height > 0 && row == self.screen.bottom.y {
            EventTarget::Control(ControlKind::TextInput)
        } else {
            EventTarget::Document
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.clear_status();

        if let Some(gesture) = key_gesture(&key, self.key_target()) {
            let outcome = self.controller.handle(gesture, &mut self.surface);
            self.last_outcome = Some(outcome);
            if outcome.suppresses_default() {
                self.pending_key = None;
                return;
            }
            if !self.is_prompt_open() {
                self.pending_key = None;
                self.native_key_scroll(nav_key(&key), outcome);
                return;
            }
        }

        let action = handle_key_event(key, self.is_prompt_open(), self.pending_key, &self.keymap);
        self.apply(action);
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if mouse.row == self.screen.navbar.y {
                let titles: Vec<&str> = self.sections.iter().map(|s| s.title.as_str()).collect();
                if let Some(index) = navbar::hit_test(&titles, self.screen.navbar, mouse.column) {
                    self.jump_to_section(index);
                }
            }
            return;
        }

        let target = self.wheel_target(mouse.row);
        let Some(gesture) = wheel_gesture(&mouse, self.config.ui.wheel_step_px, target) else {
            return;
        };
        let outcome = self.controller.handle(gesture, &mut self.surface);
        self.last_outcome = Some(outcome);

        match outcome {
            Outcome::Paged { .. } => {}
            // the section scroll owns the viewport until it settles
            Outcome::PassThrough(PassReason::Paging) => {}
            // zoom belongs to the terminal
            Outcome::PassThrough(PassReason::ZoomModifier) => {}
            Outcome::PassThrough(_) => {
                let rows = self.config.ui.native_wheel_rows as i32;
                match mouse.kind {
                    MouseEventKind::ScrollDown => self.surface.scroll_rows(rows),
                    MouseEventKind::ScrollUp => self.surface.scroll_rows(-rows),
                    _ => {}
                }
            }
        }
    }

    /// Settle timer fired
    pub fn on_settled(&mut self, ticket: SettleTicket) {
        if self.controller.settle(ticket) {
            debug!(generation = ticket.generation(), "Paging lock released");
        }
    }

    /// Advance animations; forwards the end of a section scroll
    pub fn tick(&mut self) {
        self.surface.update();
        if self.surface.take_section_scroll_finished() && self.controller.scroll_finished() {
            debug!("Paging lock released on scroll end");
        }
    }

    pub fn needs_fast_update(&self) -> bool {
        self.surface.needs_update()
    }

    /// Native scroll for a paging key the controller passed through
    fn native_key_scroll(&mut self, key: NavKey, outcome: Outcome) {
        if outcome == Outcome::PassThrough(PassReason::Paging) {
            return;
        }
        let lines = self.config.ui.scroll.scroll_lines.max(1) as i32;
        match key {
            NavKey::PageDown | NavKey::Space => self.surface.scroll_pages(1),
            NavKey::PageUp => self.surface.scroll_pages(-1),
            NavKey::ArrowDown => self.surface.scroll_rows(lines),
            NavKey::ArrowUp => self.surface.scroll_rows(-lines),
            NavKey::Other => {}
        }
    }

    pub fn apply(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::GotoPrompt => self.prompt = Some(String::new()),
            Action::JumpToTop => self.jump_to_section(0),
            Action::JumpToBottom => {
                let last = self.controller.order().last_index();
                self.jump_to_section(last);
            }
            Action::JumpToSection(index) => self.jump_to_section(index),
            Action::OpenContact => self.open_contact(),
            Action::ScrollLineDown => self.surface.scroll_rows(self.line_step()),
            Action::ScrollLineUp => self.surface.scroll_rows(-self.line_step()),
            Action::PendingG => self.pending_key = Some('g'),
            Action::Confirm => self.confirm_prompt(),
            Action::Cancel => self.prompt = None,
            Action::InputChar(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.push(c);
                }
            }
            Action::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.pop();
                }
            }
            Action::None => {}
        }
    }

    fn line_step(&self) -> i32 {
        self.config.ui.scroll.scroll_lines.max(1) as i32
    }

    /// Navbar-style jump: smooth scroll, no paging lock
    pub fn jump_to_section(&mut self, index: usize) {
        if !self.controller.navigate_to(index, &mut self.surface) {
            self.set_status("Section not available");
        }
    }

    /// First section whose id or title starts with `query`, case-insensitive
    pub fn find_section(&self, query: &str) -> Option<usize> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.sections.iter().position(|s| {
            s.id.to_lowercase().starts_with(&query) || s.title.to_lowercase().starts_with(&query)
        })
    }

    fn confirm_prompt(&mut self) {
        let Some(query) = self.prompt.take() else {
            return;
        };
        match self.find_section(&query) {
            Some(index) => self.jump_to_section(index),
            None => self.set_status(format!("No section matching '{}'", query.trim())),
        }
    }

    fn open_contact(&mut self) {
        let url = format!("mailto:{}", self.config.general.contact_email);
        if let Err(e) = open::that(&url) {
            warn!("Failed to open {}: {}", url, e);
            self.set_status(format!("Failed to open mail client: {}", e));
        } else {
            self.set_status(format!("Opening {}", url));
        }
    }
}
