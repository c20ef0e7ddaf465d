use super::*;

#[derive(Debug, Default, Parser)]
#[command(
  name = "commentor",
  version,
  about = "Read and post comments from the terminal"
)]
pub(crate) struct Arguments {
  #[arg(long, env = "COMMENTOR_ADD_COMMENT_URL", value_name = "URL")]
  pub(crate) add_comment_url: Option<String>,
  #[arg(long, value_name = "PATH")]
  pub(crate) config: Option<PathBuf>,
  #[arg(long, env = "COMMENTOR_GET_COMMENTS_URL", value_name = "URL")]
  pub(crate) get_comments_url: Option<String>,
  #[arg(long, env = "COMMENTOR_LIMIT", value_name = "N")]
  pub(crate) limit: Option<usize>,
  #[arg(long, env = "COMMENTOR_LOG_FILE", value_name = "PATH")]
  pub(crate) log_file: Option<PathBuf>,
  #[arg(long)]
  pub(crate) template: Option<String>,
}

impl Arguments {
  pub(crate) fn overrides(&self) -> Config {
    Config {
      add_comment_url: self.add_comment_url.clone(),
      get_comments_url: self.get_comments_url.clone(),
      limit: self.limit,
      template: self.template.clone(),
    }
  }
}
