/// A trait for records identified by an opaque string primary key.
pub trait HasPrimaryKey {
    /// Returns the primary key of the record.
    fn primary_key(&self) -> &str;
}
