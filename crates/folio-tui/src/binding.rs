use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use folio_core::paging::InputBinding;
use folio_core::Error;
use tracing::debug;

/// Wheel events only reach the app while mouse capture is on, so capture is
/// the listener the paging controller attaches and detaches.
pub struct MouseCapture<W: Write> {
    out: W,
    enabled: bool,
}

impl MouseCapture<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> MouseCapture<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> InputBinding for MouseCapture<W> {
    fn attach(&mut self) -> folio_core::Result<()> {
        execute!(self.out, EnableMouseCapture)
            .map_err(|e| Error::InputBinding(format!("enable mouse capture: {e}")))?;
        self.enabled = true;
        debug!("Mouse capture enabled");
        Ok(())
    }

    fn detach(&mut self) -> folio_core::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        execute!(self.out, DisableMouseCapture)
            .map_err(|e| Error::InputBinding(format!("disable mouse capture: {e}")))?;
        self.enabled = false;
        debug!("Mouse capture disabled");
        Ok(())
    }
}
