use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn comment_list_item(text: &str, available_width: u16) -> ListItem<'static> {
    let wrap_width = usize::from(available_width)
      .saturating_sub(BASE_INDENT.len())
      .max(1);

    let mut lines = wrap_lines(text, wrap_width)
      .into_iter()
      .enumerate()
      .map(|(index, line)| {
        let style = if index == 0 {
          Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
          Style::default().fg(Color::DarkGray)
        };

        Line::from(vec![Span::raw(BASE_INDENT), Span::styled(line, style)])
      })
      .collect::<Vec<_>>();

    lines.push(Line::from(Span::raw(BASE_INDENT)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
      ])
      .split(frame.area());

    let title = Paragraph::new(Line::from(vec![
      Span::styled(
        "COMMENTOR",
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!(" {}", self.state.options().get_comments_url),
        Style::default().fg(Color::DarkGray),
      ),
    ]));

    frame.render_widget(title, layout[0]);

    self.draw_comments(frame, layout[1]);

    if let Some(text) = self.state.error().text() {
      let error = Paragraph::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(
          truncate(text, usize::from(layout[2].width).saturating_sub(4)),
          Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
      ]));

      frame.render_widget(error, layout[2]);
    }

    self.draw_field(frame, layout[3], Field::Author);
    self.draw_field(frame, layout[4], Field::Text);

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[5]);

    self.state.help().draw(frame);
  }

  fn draw_comments(&mut self, frame: &mut Frame, area: Rect) {
    if !self.state.comments().is_visible() {
      return;
    }

    let title = if self.state.comments().is_loading() {
      format!(" {COMMENTS_TITLE} ")
    } else {
      format!(" {COMMENTS_TITLE} ({}) ", self.state.comments().comments().len())
    };

    let block = Block::default()
      .title(title)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);

    frame.render_widget(block, area);

    self.state.set_list_height(usize::from(inner.height) / 3);

    let template = self.state.options().template.clone();

    let placeholder = |text: &'static str| {
      Paragraph::new(Line::from(vec![Span::raw(BASE_INDENT), Span::raw(text)]))
    };

    match self.state.comments_mut().content_mut() {
      CommentsContent::Empty => {}
      CommentsContent::Loading { .. } => {
        frame.render_widget(placeholder(LOADING_STATUS), inner);
      }
      CommentsContent::Rendered(view) if view.is_empty() => {
        frame.render_widget(placeholder(NO_COMMENTS_STATUS), inner);
      }
      CommentsContent::Rendered(view) => {
        let items = view
          .items()
          .iter()
          .map(|comment| {
            Self::comment_list_item(&template.render(comment), inner.width)
          })
          .collect::<Vec<_>>();

        let mut list_state = ListState::default()
          .with_selected(view.selected_index())
          .with_offset(view.offset());

        let list = List::new(items).highlight_style(
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        );

        frame.render_stateful_widget(list, inner, &mut list_state);

        view.set_offset(list_state.offset());
      }
    }
  }

  fn draw_field(&self, frame: &mut Frame, area: Rect, field: Field) {
    let focused =
      self.state.form().focus() == field && !self.state.help().is_visible();

    let border_style = if focused {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
      .title(field.label())
      .borders(Borders::ALL)
      .border_style(border_style);

    let inner = block.inner(area);

    let value = self.state.form().value(field);

    let width = usize::from(inner.width).saturating_sub(1);
    let skip = value.chars().count().saturating_sub(width);
    let visible = value.chars().skip(skip).collect::<String>();

    let cursor_x = inner.x.saturating_add(
      u16::try_from(visible.chars().count()).unwrap_or(u16::MAX),
    );

    frame.render_widget(Paragraph::new(visible).block(block), area);

    if focused {
      frame.set_cursor_position((cursor_x, inner.y));
    }
  }

  fn execute_effect(&self, effect: Effect) {
    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::FetchComments { limit, request_id } => {
        let url = self.state.options().get_comments_url.clone();

        debug!(request_id, limit, %url, "fetching comments");

        self.handle.spawn(async move {
          let _ = sender.send(Event::Comments {
            request_id,
            result: client.fetch_comments(url, limit).await,
          });
        });
      }
      Effect::SubmitComment {
        author,
        request_id,
        text,
      } => {
        let url = self.state.options().add_comment_url.clone();

        debug!(request_id, %url, "submitting comment");

        self.handle.spawn(async move {
          let _ = sender.send(Event::CommentAdded {
            request_id,
            result: client.add_comment(url, &author, &text).await,
          });
        });
      }
    }
  }

  fn execute_effects(&self, effects: Vec<Effect>) {
    for effect in effects {
      self.execute_effect(effect);
    }
  }

  pub(crate) fn new(client: Client, state: State) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      let effects = self.state.handle_event(event);
      self.execute_effects(effects);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    let effects = self.state.take_effects();

    self.execute_effects(effects);

    self.schedule_refresh();

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = self.state.handle_key(key);

      let dispatch = self.state.dispatch_command(command);

      self.execute_effects(dispatch.effects);

      if dispatch.should_exit {
        break;
      }
    }

    Ok(())
  }

  fn schedule_refresh(&self) {
    self
      .handle
      .spawn(Self::send_refreshes(self.event_tx.clone(), REFRESH_INTERVAL));
  }

  /// Sends a refresh event every `period`, the first one `period` from now,
  /// until the receiving side goes away.
  async fn send_refreshes(sender: UnboundedSender<Event>, period: Duration) {
    let mut interval = time::interval_at(time::Instant::now() + period, period);

    loop {
      interval.tick().await;

      if sender.send(Event::Refresh).is_err() {
        break;
      }
    }
  }
}
