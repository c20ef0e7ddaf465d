use super::*;

#[derive(Debug, Error)]
pub(crate) enum RequestError {
  #[error("response was not valid JSON")]
  Decode {
    source: reqwest::Error,
    text: Option<String>,
  },
  #[error("server responded with {code}")]
  Status { code: u16, text: Option<String> },
  #[error("request timed out")]
  Timeout,
  #[error("request failed")]
  Transport { source: reqwest::Error },
}

impl From<reqwest::Error> for RequestError {
  fn from(source: reqwest::Error) -> Self {
    if source.is_timeout() {
      Self::Timeout
    } else if source.is_decode() {
      Self::Decode { source, text: None }
    } else if let Some(status) = source.status() {
      Self::from(status)
    } else {
      Self::Transport { source }
    }
  }
}

impl From<StatusCode> for RequestError {
  fn from(status: StatusCode) -> Self {
    Self::Status {
      code: status.as_u16(),
      text: status.canonical_reason().map(str::to_owned),
    }
  }
}

impl RequestError {
  /// The text shown in the error region: the server's status text when it
  /// has one, then the timeout message, then a catch-all.
  pub(crate) fn user_message(&self) -> String {
    match self {
      Self::Decode {
        text: Some(text), ..
      }
      | Self::Status {
        text: Some(text), ..
      } if !text.is_empty() => text.clone(),
      Self::Timeout => TIMEOUT_ERROR.into(),
      _ => UNKNOWN_SERVER_ERROR.into(),
    }
  }

  /// Attaches the status text of an otherwise successful response to a body
  /// that failed to decode.
  pub(crate) fn with_status_text(self, text: Option<String>) -> Self {
    match self {
      Self::Decode { source, .. } => Self::Decode { source, text },
      other => other,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_text_is_passed_through() {
    let error = RequestError::from(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error.user_message(), "Service Unavailable");
  }

  #[test]
  fn timeout_has_its_own_message() {
    assert_eq!(RequestError::Timeout.user_message(), "Timeout Error");
  }

  #[test]
  fn status_text_only_attaches_to_decode_failures() {
    let timeout = RequestError::Timeout.with_status_text(Some("OK".into()));
    assert_eq!(timeout.user_message(), "Timeout Error");
  }

  #[test]
  fn missing_status_text_falls_back_to_generic_message() {
    let unknown = RequestError::from(StatusCode::from_u16(599).unwrap());
    assert_eq!(unknown.user_message(), "Unknown Server Error");

    let empty = RequestError::Status {
      code: 500,
      text: Some(String::new()),
    };
    assert_eq!(empty.user_message(), "Unknown Server Error");
  }
}
