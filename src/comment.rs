use super::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct Comment {
  #[serde(default, deserialize_with = "deserialize_optional_string")]
  pub(crate) author: Option<String>,
  #[serde(flatten)]
  pub(crate) extra: Map<String, Value>,
  #[serde(default, deserialize_with = "deserialize_optional_string")]
  pub(crate) text: Option<String>,
}

impl Comment {
  pub(crate) fn author(&self) -> &str {
    self.author.as_deref().unwrap_or_default()
  }

  /// Looks up a field by name for template rendering. Extra fields returned
  /// by the server are rendered as their plain value, strings unquoted.
  pub(crate) fn field(&self, name: &str) -> Option<String> {
    match name {
      "author" => Some(self.author().to_string()),
      "text" => Some(self.text().to_string()),
      _ => self.extra.get(name).map(|value| match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
      }),
    }
  }

  /// The comment body, taken from `body` when the server sends no `text`.
  pub(crate) fn text(&self) -> &str {
    self
      .text
      .as_deref()
      .or_else(|| self.extra.get("body").and_then(Value::as_str))
      .unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_author_and_text_with_extra_fields() {
    let comment = serde_json::from_str::<Comment>(
      r#"{"author": "alice", "text": "hi", "id": 7, "created": "today"}"#,
    )
    .unwrap();

    assert_eq!(comment.author(), "alice");
    assert_eq!(comment.text(), "hi");
    assert_eq!(comment.field("id"), Some("7".to_string()));
    assert_eq!(comment.field("created"), Some("today".to_string()));
    assert_eq!(comment.field("missing"), None);
  }

  #[test]
  fn accepts_body_and_missing_fields() {
    let comment =
      serde_json::from_str::<Comment>(r#"{"body": "from body"}"#).unwrap();

    assert_eq!(comment.author(), "");
    assert_eq!(comment.text(), "from body");
    assert_eq!(comment.field("text"), Some("from body".to_string()));
  }

  #[test]
  fn text_wins_over_body_when_both_are_sent() {
    let comments = serde_json::from_str::<Vec<Comment>>(
      r#"[{"text": "from text", "body": "from body"}, {"body": "only"}]"#,
    )
    .unwrap();

    assert_eq!(comments[0].text(), "from text");
    assert_eq!(comments[0].field("body"), Some("from body".to_string()));
    assert_eq!(comments[1].text(), "only");
  }

  #[test]
  fn numeric_author_is_rendered_as_text() {
    let comment =
      serde_json::from_str::<Comment>(r#"{"author": 42, "text": null}"#)
        .unwrap();

    assert_eq!(comment.author(), "42");
    assert_eq!(comment.text(), "");
  }
}
