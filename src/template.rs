use super::*;

#[derive(Clone, Debug, PartialEq)]
enum Segment {
  Field(String),
  Literal(String),
}

/// Renders a comment through a `{field}` template. `{{` and `}}` stand for
/// literal braces.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CommentTemplate {
  segments: Vec<Segment>,
}

impl Default for CommentTemplate {
  fn default() -> Self {
    Self {
      segments: vec![
        Segment::Field("author".into()),
        Segment::Literal("\n".into()),
        Segment::Field("text".into()),
      ],
    }
  }
}

impl FromStr for CommentTemplate {
  type Err = TemplateError;

  fn from_str(source: &str) -> Result<Self, Self::Err> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = source.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
      match ch {
        '{' if chars.next_if(|&(_, next)| next == '{').is_some() => {
          literal.push('{');
        }
        '}' if chars.next_if(|&(_, next)| next == '}').is_some() => {
          literal.push('}');
        }
        '{' => {
          let mut name = String::new();

          loop {
            match chars.next() {
              Some((_, '}')) => break,
              Some((_, '{')) | None => {
                return Err(TemplateError::Unterminated { position });
              }
              Some((_, c)) => name.push(c),
            }
          }

          let name = name.trim();

          if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder { position });
          }

          if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
          }

          segments.push(Segment::Field(name.to_string()));
        }
        '}' => return Err(TemplateError::UnmatchedClose { position }),
        _ => literal.push(ch),
      }
    }

    if !literal.is_empty() {
      segments.push(Segment::Literal(literal));
    }

    Ok(Self { segments })
  }
}

impl CommentTemplate {
  pub(crate) fn render(&self, comment: &Comment) -> String {
    let mut rendered = String::new();

    for segment in &self.segments {
      match segment {
        Segment::Field(name) => {
          if let Some(value) = comment.field(name) {
            rendered.push_str(&value);
          }
        }
        Segment::Literal(text) => rendered.push_str(text),
      }
    }

    rendered
  }
}

#[derive(Debug, Error, PartialEq)]
pub(crate) enum TemplateError {
  #[error("empty placeholder at byte {position}")]
  EmptyPlaceholder { position: usize },
  #[error("unmatched `}}` at byte {position}")]
  UnmatchedClose { position: usize },
  #[error("unterminated placeholder starting at byte {position}")]
  Unterminated { position: usize },
}
