//! Row trait

/// A row the engine can list.
///
/// The engine never inspects a row's shape directly. It needs a stable
/// identifier from the row itself, and reads every other field through the
/// accessors of a [`Columns`](super::Columns) set.
///
/// # Example
///
/// ```
/// use tabula_lib::model::Row;
///
/// struct Member {
///     id: u32,
///     name: String,
/// }
///
/// impl Row for Member {
///     fn row_id(&self) -> String {
///         self.id.to_string()
///     }
/// }
/// ```
pub trait Row {
    /// Stable unique identifier of the row.
    fn row_id(&self) -> String;
}

impl<T: Row + ?Sized> Row for &T {
    fn row_id(&self) -> String {
        (**self).row_id()
    }
}
