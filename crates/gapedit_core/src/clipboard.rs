//! Clipboard collaborator seam.

/// System clipboard interop supplied by the host.
pub trait Clipboard {
    fn set_text(&mut self, text: &str);
    fn text(&self) -> Option<String>;
}

/// In-process clipboard for headless hosts and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }

    fn text(&self) -> Option<String> {
        self.contents.clone()
    }
}
