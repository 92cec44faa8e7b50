use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Three-state edit of an optional field inside a partial update
/// (`ColumnUpdate::color`, `TaskUpdate::due_date`, ...).
///
/// On the wire an absent key is `NoChange`, `null` is `Clear` and any other
/// value is `Set`. Containing structs mark the field with
/// `#[serde(default, skip_serializing_if = "FieldUpdate::is_no_change")]`.
///
/// ```
/// use kanban_domain::FieldUpdate;
///
/// let mut due = Some("friday".to_string());
/// FieldUpdate::<String>::NoChange.apply_to(&mut due);
/// assert_eq!(due.as_deref(), Some("friday"));
///
/// FieldUpdate::Clear.apply_to(&mut due);
/// assert_eq!(due, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    /// Write the edit into `field`.
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `None` clears; used to copy a whole entity into an update.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => serializer.serialize_some(value),
            FieldUpdate::NoChange | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(FieldUpdate::from)
    }
}
