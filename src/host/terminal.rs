//! Terminal host window.
//!
//! Treats the controlling terminal as the viewport. Dimensions come from the
//! terminal's reported pixel size when available; terminals that only report
//! cells are converted with a fixed cell size. Terminals have no touch input,
//! no user agent and no orientation API.
//!
//! # Example
//!
//! ```ignore
//! use spark_device::host::TerminalWindow;
//! use std::time::Duration;
//!
//! let window = TerminalWindow::detect()?;
//! loop {
//!     // Polls one crossterm event and dispatches resize listeners
//!     if let Some(event) = window.pump(Duration::from_millis(100))? {
//!         // application handles keys etc.
//!     }
//! }
//! ```

use std::cell::Cell;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal;

use super::{Cleanup, HostListener, HostWindow, ListenerSet};

/// Pixel size of one terminal cell when the terminal does not report pixels.
pub const DEFAULT_CELL_SIZE: (u32, u32) = (8, 16);

pub struct TerminalWindow {
    cell_size: (u32, u32),
    width: Cell<u32>,
    height: Cell<u32>,
    resize_listeners: ListenerSet,
}

impl TerminalWindow {
    /// Build from explicit cell dimensions without touching the terminal.
    pub fn from_cells(columns: u16, rows: u16, cell_size: (u32, u32)) -> Self {
        let window = Self {
            cell_size,
            width: Cell::new(0),
            height: Cell::new(0),
            resize_listeners: ListenerSet::new(),
        };
        window.apply_size(columns, rows, None);
        window
    }

    /// Query the controlling terminal for its current size.
    pub fn detect() -> io::Result<Self> {
        Self::detect_with_cell_size(DEFAULT_CELL_SIZE)
    }

    pub fn detect_with_cell_size(cell_size: (u32, u32)) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let window = Self::from_cells(columns, rows, cell_size);
        window.apply_size(columns, rows, query_pixels());
        Ok(window)
    }

    /// Update dimensions from a cell count and optional pixel size.
    ///
    /// Pixel sizes of zero are treated as unreported.
    pub fn apply_size(&self, columns: u16, rows: u16, pixels: Option<(u16, u16)>) {
        let (width, height) = match pixels {
            Some((w, h)) if w > 0 && h > 0 => (w as u32, h as u32),
            _ => (
                columns as u32 * self.cell_size.0,
                rows as u32 * self.cell_size.1,
            ),
        };

        if width == 0 || height == 0 {
            tracing::warn!(columns, rows, "terminal reported an empty viewport");
        }

        self.width.set(width);
        self.height.set(height);
    }

    /// Apply a crossterm event. Returns true if it was a resize.
    pub fn handle_event(&self, event: &Event) -> bool {
        match event {
            Event::Resize(columns, rows) => {
                self.apply_size(*columns, *rows, query_pixels());
                tracing::trace!(
                    width = self.width.get(),
                    height = self.height.get(),
                    "terminal resized"
                );
                self.resize_listeners.dispatch();
                true
            }
            _ => false,
        }
    }

    /// Wait up to `timeout` for one terminal event and route it.
    ///
    /// Resize events are dispatched to listeners; every event is returned to
    /// the caller so it can handle input.
    pub fn pump(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let event = event::read()?;
        self.handle_event(&event);
        Ok(Some(event))
    }

    pub fn cell_size(&self) -> (u32, u32) {
        self.cell_size
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }
}

fn query_pixels() -> Option<(u16, u16)> {
    terminal::window_size().ok().map(|size| (size.width, size.height))
}

impl HostWindow for TerminalWindow {
    fn inner_width(&self) -> u32 {
        self.width.get()
    }

    fn inner_height(&self) -> u32 {
        self.height.get()
    }

    fn max_touch_points(&self) -> u32 {
        0
    }

    fn user_agent(&self) -> String {
        String::new()
    }

    fn on_resize(&self, listener: HostListener) -> Cleanup {
        self.resize_listeners.add(listener)
    }

    fn on_orientation_change(&self, _listener: HostListener) -> Option<Cleanup> {
        None
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_cells_to_pixels() {
        let window = TerminalWindow::from_cells(80, 24, DEFAULT_CELL_SIZE);
        assert_eq!(window.inner_width(), 640);
        assert_eq!(window.inner_height(), 384);
        assert_eq!(window.max_touch_points(), 0);
        assert_eq!(window.user_agent(), "");
    }

    #[test]
    fn test_reported_pixels_win() {
        let window = TerminalWindow::from_cells(80, 24, DEFAULT_CELL_SIZE);
        window.apply_size(80, 24, Some((1600, 900)));
        assert_eq!((window.inner_width(), window.inner_height()), (1600, 900));

        // Zero pixels means the terminal did not report them
        window.apply_size(100, 50, Some((0, 0)));
        assert_eq!((window.inner_width(), window.inner_height()), (800, 800));
    }

    #[test]
    fn test_non_resize_event_ignored() {
        let window = TerminalWindow::from_cells(80, 24, DEFAULT_CELL_SIZE);
        let handled = window.handle_event(&Event::FocusGained);
        assert!(!handled);
    }

    #[test]
    fn test_resize_event_dispatches() {
        let window = TerminalWindow::from_cells(80, 24, DEFAULT_CELL_SIZE);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let cleanup = window.on_resize(Rc::new(move || count_clone.set(count_clone.get() + 1)));

        assert!(window.handle_event(&Event::Resize(120, 40)));
        assert_eq!(count.get(), 1);

        cleanup();
        assert_eq!(window.resize_listener_count(), 0);
    }

    #[test]
    fn test_no_orientation_api() {
        let window = TerminalWindow::from_cells(80, 24, DEFAULT_CELL_SIZE);
        assert!(window.on_orientation_change(Rc::new(|| {})).is_none());
    }
}
