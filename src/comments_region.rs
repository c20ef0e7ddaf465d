use super::*;

pub(crate) enum CommentsContent {
  Empty,
  Loading {
    previous: Option<ListView<Comment>>,
  },
  Rendered(ListView<Comment>),
}

/// The comment list area. Content and visibility change independently: a
/// refresh shows the loading placeholder without revealing a region hidden
/// by an earlier failure.
pub(crate) struct CommentsRegion {
  content: CommentsContent,
  visible: bool,
}

impl Default for CommentsRegion {
  fn default() -> Self {
    Self {
      content: CommentsContent::Empty,
      visible: true,
    }
  }
}

impl CommentsRegion {
  pub(crate) fn comments(&self) -> &[Comment] {
    match &self.content {
      CommentsContent::Rendered(view) => view.items(),
      CommentsContent::Empty | CommentsContent::Loading { .. } => &[],
    }
  }

  pub(crate) fn content_mut(&mut self) -> &mut CommentsContent {
    &mut self.content
  }

  pub(crate) fn hide(&mut self) {
    self.visible = false;
  }

  pub(crate) fn is_loading(&self) -> bool {
    matches!(self.content, CommentsContent::Loading { .. })
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn move_selection(&mut self, delta: isize) {
    if let CommentsContent::Rendered(view) = &mut self.content {
      view.move_by(delta);
    }
  }

  /// Shows `comments`, keeping the selection of the list that was on
  /// screen before the refresh started.
  pub(crate) fn render(&mut self, comments: Vec<Comment>) {
    let view = match std::mem::replace(&mut self.content, CommentsContent::Empty)
    {
      CommentsContent::Rendered(mut view)
      | CommentsContent::Loading {
        previous: Some(mut view),
      } => {
        view.replace(comments);
        view
      }
      CommentsContent::Empty | CommentsContent::Loading { previous: None } => {
        ListView::new(comments)
      }
    };

    self.content = CommentsContent::Rendered(view);

    self.visible = true;
  }

  pub(crate) fn select(&mut self, index: usize) {
    if let CommentsContent::Rendered(view) = &mut self.content {
      view.set_selected(index);
    }
  }

  pub(crate) fn set_loading(&mut self) {
    let previous =
      match std::mem::replace(&mut self.content, CommentsContent::Empty) {
        CommentsContent::Rendered(view) => Some(view),
        CommentsContent::Loading { previous } => previous,
        CommentsContent::Empty => None,
      };

    self.content = CommentsContent::Loading { previous };
  }
}
