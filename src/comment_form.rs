use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Field {
  #[default]
  Author,
  Text,
}

impl Field {
  pub(crate) fn label(self) -> &'static str {
    match self {
      Self::Author => "Author",
      Self::Text => "Text",
    }
  }

  pub(crate) fn other(self) -> Self {
    match self {
      Self::Author => Self::Text,
      Self::Text => Self::Author,
    }
  }
}

#[derive(Debug, Default)]
pub(crate) struct CommentForm {
  author: String,
  focus: Field,
  text: String,
}

impl CommentForm {
  pub(crate) fn clear_focused(&mut self) {
    self.value_mut(self.focus).clear();
  }

  pub(crate) fn delete_backward(&mut self) {
    self.value_mut(self.focus).pop();
  }

  pub(crate) fn focus(&self) -> Field {
    self.focus
  }

  pub(crate) fn focus_next(&mut self) {
    self.focus = self.focus.other();
  }

  pub(crate) fn insert(&mut self, ch: char) {
    self.value_mut(self.focus).push(ch);
  }

  /// Empties both fields and puts the cursor back on the author field, ready
  /// for the next comment.
  pub(crate) fn reset(&mut self) {
    self.text.clear();
    self.author.clear();
    self.focus = Field::Author;
  }

  pub(crate) fn set_focus(&mut self, field: Field) {
    self.focus = field;
  }

  pub(crate) fn value(&self, field: Field) -> &str {
    match field {
      Field::Author => &self.author,
      Field::Text => &self.text,
    }
  }

  fn value_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::Author => &mut self.author,
      Field::Text => &mut self.text,
    }
  }
}
