use super::*;

pub(crate) enum Event {
  CommentAdded {
    request_id: u64,
    result: Result<(), RequestError>,
  },
  Comments {
    request_id: u64,
    result: Result<Vec<Comment>, RequestError>,
  },
  Refresh,
}
