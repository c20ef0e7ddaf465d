use super::*;

pub(crate) struct HelpView {
  message_backup: Option<String>,
  visible: bool,
}

impl HelpView {
  pub(crate) fn draw(&self, frame: &mut Frame) {
    if !self.visible {
      return;
    }

    let area = Self::help_area(frame.area());

    frame.render_widget(Clear, area);

    let help = Paragraph::new(HELP_TEXT)
      .block(Block::default().title(HELP_TITLE).borders(Borders::ALL))
      .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::F(1) | KeyCode::Esc => Command::HideHelp,
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        Command::Quit
      }
      _ => Command::None,
    }
  }

  /// Centers a box sized to the help text inside `area`, shrinking it when
  /// the terminal is too small.
  fn help_area(area: Rect) -> Rect {
    let (line_count, max_line_width) = HELP_TEXT
      .lines()
      .fold((0usize, 0usize), |(count, width), line| {
        (count.saturating_add(1), width.max(line.chars().count()))
      });

    let desired_width =
      u16::try_from(max_line_width.saturating_add(2)).unwrap_or(u16::MAX);

    let desired_height =
      u16::try_from(line_count.saturating_add(2)).unwrap_or(u16::MAX);

    let width = desired_width.min(area.width.saturating_sub(2).max(1));
    let height = desired_height.min(area.height.saturating_sub(2).max(1));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
  }

  pub(crate) fn hide(&mut self, message: &mut String) {
    if !self.visible {
      return;
    }

    *message = self
      .message_backup
      .take()
      .unwrap_or_else(|| FORM_STATUS.into());

    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn new() -> Self {
    Self {
      message_backup: None,
      visible: false,
    }
  }

  pub(crate) fn show(&mut self, message: &mut String) {
    if self.visible {
      return;
    }

    self.message_backup = Some(std::mem::replace(message, HELP_STATUS.into()));

    self.visible = true;
  }
}
