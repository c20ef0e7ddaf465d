#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  ClearField,
  DeleteBackward,
  FocusNext,
  HideHelp,
  Insert(char),
  None,
  PageDown,
  PageUp,
  Quit,
  Refresh,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  Submit,
}
