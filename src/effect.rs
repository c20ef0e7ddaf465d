#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  FetchComments {
    limit: usize,
    request_id: u64,
  },
  SubmitComment {
    author: String,
    request_id: u64,
    text: String,
  },
}
