use super::*;

pub(crate) struct State {
  comments: CommentsRegion,
  error: ErrorRegion,
  form: CommentForm,
  help: HelpView,
  list_height: usize,
  message: String,
  next_request_id: u64,
  options: Options,
  pending_effects: Vec<Effect>,
  transient_message: Option<TransientMessage>,
}

impl State {
  pub(crate) fn comments(&self) -> &CommentsRegion {
    &self.comments
  }

  pub(crate) fn comments_mut(&mut self) -> &mut CommentsRegion {
    &mut self.comments
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> CommandDispatch {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::Insert(ch) => self.form.insert(ch),
      Command::DeleteBackward => self.form.delete_backward(),
      Command::ClearField => self.form.clear_focused(),
      Command::FocusNext => self.form.focus_next(),
      Command::Submit => self.submit_comment(),
      Command::Refresh => self.fetch_comments(None),
      Command::SelectNext => self.comments.move_selection(1),
      Command::SelectPrevious => self.comments.move_selection(-1),
      Command::PageDown => {
        let jump = self.page_jump();
        self.comments.move_selection(jump);
      }
      Command::PageUp => {
        let jump = self.page_jump();
        self.comments.move_selection(-jump);
      }
      Command::SelectFirst => self.comments.select(0),
      Command::SelectLast => self.comments.select(usize::MAX),
      Command::None => {}
    }

    CommandDispatch {
      effects: self.take_effects(),
      should_exit,
    }
  }

  pub(crate) fn error(&self) -> &ErrorRegion {
    &self.error
  }

  /// Starts a read of the comment list. Requests are never de-duplicated:
  /// whichever completion arrives last decides what is on screen.
  pub(crate) fn fetch_comments(&mut self, limit: Option<usize>) {
    let limit = limit.unwrap_or(self.options.limit);

    let request_id = self.next_request_id();

    self.comments.set_loading();

    self
      .pending_effects
      .push(Effect::FetchComments { limit, request_id });
  }

  pub(crate) fn form(&self) -> &CommentForm {
    &self.form
  }

  pub(crate) fn handle_event(&mut self, event: Event) -> Vec<Effect> {
    match event {
      Event::Comments { request_id, result } => match result {
        Ok(comments) => {
          info!(request_id, count = comments.len(), "comments loaded");

          self.error.hide();
          self.comments.render(comments);
        }
        Err(error) => self.show_request_error(request_id, &error),
      },
      Event::CommentAdded { request_id, result } => match result {
        Ok(()) => {
          info!(request_id, "comment posted");

          self.form.reset();
          self.fetch_comments(None);

          if !self.help.is_visible() {
            self.set_transient_message(COMMENT_POSTED_STATUS.into());
          }
        }
        Err(error) => self.show_request_error(request_id, &error),
      },
      Event::Refresh => self.fetch_comments(None),
    }

    self.take_effects()
  }

  /// Maps a key press to a command. Editing keys go to the focused field;
  /// while help is open only the help keys apply.
  pub(crate) fn handle_key(&self, key: KeyEvent) -> Command {
    if self.help.is_visible() {
      return HelpView::handle_key(key);
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      KeyCode::Esc => Command::Quit,
      KeyCode::Char('c') if control => Command::Quit,
      KeyCode::Char('r') if control => Command::Refresh,
      KeyCode::Char('u') if control => Command::ClearField,
      KeyCode::Char(ch)
        if !control
          && !key.modifiers.contains(KeyModifiers::ALT)
          && !key.modifiers.contains(KeyModifiers::SUPER) =>
      {
        Command::Insert(ch)
      }
      KeyCode::Backspace => Command::DeleteBackward,
      KeyCode::Tab | KeyCode::BackTab => Command::FocusNext,
      KeyCode::Enter => Command::Submit,
      KeyCode::F(1) => Command::ShowHelp,
      KeyCode::F(5) => Command::Refresh,
      KeyCode::Down => Command::SelectNext,
      KeyCode::Up => Command::SelectPrevious,
      KeyCode::PageDown => Command::PageDown,
      KeyCode::PageUp => Command::PageUp,
      KeyCode::Home => Command::SelectFirst,
      KeyCode::End => Command::SelectLast,
      _ => Command::None,
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  /// Validates `config` and queues the first read of the comment list. A
  /// configuration error leaves nothing behind, so no request is made.
  pub(crate) fn initialize(config: Config) -> Result<Self, ConfigError> {
    let options = Options::try_from(config)?;

    info!(
      get_comments_url = %options.get_comments_url,
      add_comment_url = %options.add_comment_url,
      limit = options.limit,
      "initialized comment widget"
    );

    let mut state = Self {
      comments: CommentsRegion::default(),
      error: ErrorRegion::default(),
      form: CommentForm::default(),
      help: HelpView::new(),
      list_height: 0,
      message: FORM_STATUS.into(),
      next_request_id: 0,
      options,
      pending_effects: Vec::new(),
      transient_message: None,
    };

    state.fetch_comments(None);
    state.form.set_focus(Field::Author);

    Ok(state)
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  fn next_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    request_id
  }

  pub(crate) fn options(&self) -> &Options {
    &self.options
  }

  fn page_jump(&self) -> isize {
    isize::try_from(self.list_height.saturating_sub(1).max(1))
      .unwrap_or(isize::MAX)
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message = Some(TransientMessage::new(
      message.clone(),
      original,
      TRANSIENT_MESSAGE_DURATION,
    ));

    self.message = message;
  }

  fn show_request_error(&mut self, request_id: u64, error: &RequestError) {
    warn!(request_id, %error, "request failed");

    self.comments.hide();
    self.error.show(error.user_message());
  }

  /// Queues a post of the current form values. The form is only cleared
  /// once the server accepts the comment.
  pub(crate) fn submit_comment(&mut self) {
    let request_id = self.next_request_id();

    self.pending_effects.push(Effect::SubmitComment {
      author: self.form.value(Field::Author).to_string(),
      request_id,
      text: self.form.value(Field::Text).to_string(),
    });
  }

  pub(crate) fn take_effects(&mut self) -> Vec<Effect> {
    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.original().to_string();
        self.transient_message = None;
      }
    }
  }
}
