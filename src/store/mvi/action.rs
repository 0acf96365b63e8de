/// A dispatched intent or an effect's completion event.
pub trait Action: Send + 'static {
    /// Stable label used in logs, e.g. `[Documents List] Load Documents`.
    fn name(&self) -> &'static str;
}
