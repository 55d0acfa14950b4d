/// How a mode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliModeResult {
    /// The mode did its work.
    Finish,
    /// There was nothing to do, e.g. an empty editor buffer.
    NothingToDo,
}
