//! Rendering collaborator
//!
//! The controller decides what is shown; a surface decides how. The
//! terminal front end and the test recorder both implement this.

use crate::message::{ChatMessage, Notice, Page};

pub trait Surface {
    /// Show the entry affordance used to (re)open the widget.
    fn show_trigger(&mut self);

    /// Render the empty widget shell for `page`.
    fn show_shell(&mut self, page: &Page);

    fn show_notice(&mut self, notice: &Notice);

    fn append_message(&mut self, message: &ChatMessage);

    fn show_typing(&mut self);

    fn hide_typing(&mut self);

    /// Input becomes usable.
    fn enable_input(&mut self) {}

    fn clear_input(&mut self) {}

    /// Remove the widget entirely.
    fn teardown(&mut self);
}
