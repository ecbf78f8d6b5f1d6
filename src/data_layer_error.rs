use std::error::Error;

///
/// Result of every `*DataLayer` call. The in-memory stores only hold
/// `RwLock`-guarded maps and never fail, but the traits keep a fallible
/// signature so services propagate store errors with `?`.
///
pub type Result<T> = std::result::Result<T, DataLayerError>;

///
/// Store error surfaced by a data layer. Services wrap it in their own
/// `DataLayerError` variant, which answers 500.
///
pub type DataLayerError = Box<dyn Error + Send + Sync>;
