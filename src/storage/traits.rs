//! Store backend trait.

use crate::Result;
use crate::models::StoreDocument;

/// Trait for quote store backends.
///
/// A backend holds exactly one [`StoreDocument`]. Callers load it, mutate it
/// in memory and save it back; there is no partial write.
pub trait QuoteStore: Send + Sync {
    /// Loads the document.
    ///
    /// A store that has never been written yields an empty document.
    fn load(&self) -> Result<StoreDocument>;

    /// Replaces the stored document.
    fn save(&self, document: &StoreDocument) -> Result<()>;

    /// Human-readable location, used in messages.
    fn location(&self) -> String;
}
