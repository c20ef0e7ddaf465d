#[derive(Debug, Default)]
pub(crate) struct ErrorRegion {
  text: String,
  visible: bool,
}

impl ErrorRegion {
  /// Hides the region. The last message is kept but not drawn.
  pub(crate) fn hide(&mut self) {
    self.visible = false;
  }

  pub(crate) fn show(&mut self, text: String) {
    self.text = text;
    self.visible = true;
  }

  pub(crate) fn text(&self) -> Option<&str> {
    self.visible.then_some(self.text.as_str())
  }
}
