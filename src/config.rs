use super::*;

/// Settings as read from the config file or the command line, before
/// defaults are applied.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
  pub(crate) add_comment_url: Option<String>,
  pub(crate) get_comments_url: Option<String>,
  pub(crate) limit: Option<usize>,
  pub(crate) template: Option<String>,
}

impl Config {
  fn default_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("COMMENTOR_CONFIG") {
      return Some(PathBuf::from(path));
    }

    let base_dir = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
      PathBuf::from(dir)
    } else {
      PathBuf::from(env::var_os("HOME")?).join(".config")
    };

    Some(base_dir.join("commentor").join("config.toml"))
  }

  /// Reads the config file named on the command line, or the default one if
  /// it exists, and lays the command line settings over it.
  pub(crate) fn load(arguments: &Arguments) -> Result<Self, ConfigError> {
    let file = match &arguments.config {
      Some(path) => Self::read(path)?,
      None => match Self::default_path() {
        Some(path) if path.exists() => Self::read(&path)?,
        _ => Self::default(),
      },
    };

    Ok(file.merge(arguments.overrides()))
  }

  /// Fills every unset setting in `overrides` from `self`.
  pub(crate) fn merge(self, overrides: Self) -> Self {
    Self {
      add_comment_url: overrides.add_comment_url.or(self.add_comment_url),
      get_comments_url: overrides.get_comments_url.or(self.get_comments_url),
      limit: overrides.limit.or(self.limit),
      template: overrides.template.or(self.template),
    }
  }

  fn read(path: &Path) -> Result<Self, ConfigError> {
    let content =
      fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
  #[error("invalid URL for `{name}`: {value}")]
  InvalidUrl {
    name: &'static str,
    source: url::ParseError,
    value: String,
  },
  #[error("missing required setting `{name}`")]
  MissingSetting { name: &'static str },
  #[error("could not parse config file {}", path.display())]
  Parse {
    path: PathBuf,
    source: toml::de::Error,
  },
  #[error("could not read config file {}", path.display())]
  Read { path: PathBuf, source: io::Error },
  #[error("invalid comment template")]
  Template {
    #[from]
    source: TemplateError,
  },
  #[error("`limit` must be at least 1")]
  ZeroLimit,
}

/// Validated widget settings with defaults applied.
#[derive(Clone, Debug)]
pub(crate) struct Options {
  pub(crate) add_comment_url: Url,
  pub(crate) get_comments_url: Url,
  pub(crate) limit: usize,
  pub(crate) template: CommentTemplate,
}

impl TryFrom<Config> for Options {
  type Error = ConfigError;

  fn try_from(config: Config) -> Result<Self, Self::Error> {
    fn required(
      name: &'static str,
      value: Option<String>,
    ) -> Result<Url, ConfigError> {
      let value = value
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingSetting { name })?;

      Url::parse(value.trim())
        .map_err(|source| ConfigError::InvalidUrl { name, source, value })
    }

    let add_comment_url = required("add_comment_url", config.add_comment_url)?;

    let get_comments_url =
      required("get_comments_url", config.get_comments_url)?;

    let limit = match config.limit {
      Some(0) => return Err(ConfigError::ZeroLimit),
      Some(limit) => limit,
      None => DEFAULT_LIMIT,
    };

    let template = config
      .template
      .as_deref()
      .map(str::parse::<CommentTemplate>)
      .transpose()?
      .unwrap_or_default();

    Ok(Self {
      add_comment_url,
      get_comments_url,
      limit,
      template,
    })
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    std::sync::atomic::{AtomicUsize, Ordering},
  };

  static COUNTER: AtomicUsize = AtomicUsize::new(0);

  fn complete() -> Config {
    Config {
      add_comment_url: Some("http://localhost:8080/add".into()),
      get_comments_url: Some("http://localhost:8080/comments".into()),
      limit: None,
      template: None,
    }
  }

  fn temp_config(content: &str) -> PathBuf {
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

    let path = env::temp_dir().join(format!(
      "commentor_config_test_{}_{unique}.toml",
      std::process::id()
    ));

    fs::write(&path, content).unwrap();

    path
  }

  #[test]
  fn defaults_limit_to_thirty() {
    let options = Options::try_from(complete()).unwrap();

    assert_eq!(options.limit, 30);
    assert_eq!(options.template, CommentTemplate::default());
    assert_eq!(options.get_comments_url.path(), "/comments");
  }

  #[test]
  fn missing_urls_are_reported_by_name() {
    let config = Config {
      add_comment_url: None,
      ..complete()
    };

    assert!(matches!(
      Options::try_from(config),
      Err(ConfigError::MissingSetting {
        name: "add_comment_url"
      })
    ));

    let config = Config {
      get_comments_url: Some("  ".into()),
      ..complete()
    };

    assert!(matches!(
      Options::try_from(config),
      Err(ConfigError::MissingSetting {
        name: "get_comments_url"
      })
    ));
  }

  #[test]
  fn relative_urls_are_rejected() {
    let config = Config {
      get_comments_url: Some("/comments".into()),
      ..complete()
    };

    assert!(matches!(
      Options::try_from(config),
      Err(ConfigError::InvalidUrl {
        name: "get_comments_url",
        ..
      })
    ));
  }

  #[test]
  fn zero_limit_is_rejected() {
    let config = Config {
      limit: Some(0),
      ..complete()
    };

    assert!(matches!(
      Options::try_from(config),
      Err(ConfigError::ZeroLimit)
    ));
  }

  #[test]
  fn malformed_template_is_a_config_error() {
    let config = Config {
      template: Some("{author".into()),
      ..complete()
    };

    assert!(matches!(
      Options::try_from(config),
      Err(ConfigError::Template { .. })
    ));
  }

  #[test]
  fn merge_prefers_overrides() {
    let file = Config {
      limit: Some(10),
      template: Some("{text}".into()),
      ..complete()
    };

    let overrides = Config {
      limit: Some(5),
      ..Config::default()
    };

    let merged = file.merge(overrides);

    assert_eq!(merged.limit, Some(5));
    assert_eq!(merged.template.as_deref(), Some("{text}"));
    assert_eq!(
      merged.add_comment_url.as_deref(),
      Some("http://localhost:8080/add")
    );
  }

  #[test]
  fn load_reads_explicit_file_and_applies_arguments() {
    let path = temp_config(
      "add_comment_url = \"http://example.com/add\"\n\
       get_comments_url = \"http://example.com/list\"\n\
       limit = 12\n",
    );

    let arguments = Arguments {
      config: Some(path.clone()),
      limit: Some(3),
      ..Arguments::default()
    };

    let config = Config::load(&arguments).unwrap();

    assert_eq!(config.limit, Some(3));
    assert_eq!(
      config.get_comments_url.as_deref(),
      Some("http://example.com/list")
    );

    let _ = fs::remove_file(path);
  }

  #[test]
  fn load_fails_for_missing_explicit_file() {
    let arguments = Arguments {
      config: Some(env::temp_dir().join("commentor_does_not_exist.toml")),
      ..Arguments::default()
    };

    assert!(matches!(
      Config::load(&arguments),
      Err(ConfigError::Read { .. })
    ));
  }

  #[test]
  fn load_rejects_unknown_keys() {
    let path = temp_config("get_comment_url = \"http://example.com\"\n");

    let arguments = Arguments {
      config: Some(path.clone()),
      ..Arguments::default()
    };

    assert!(matches!(
      Config::load(&arguments),
      Err(ConfigError::Parse { .. })
    ));

    let _ = fs::remove_file(path);
  }
}
