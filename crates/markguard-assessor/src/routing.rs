//! Route selection for a record

use markguard_domain::{Field, Record, RouteId};

/// Substring of the Class field that selects route B
pub const TARGET_CLASS_MARKER: &str = "9";

/// Choose the reasoning route for `record`
///
/// Class values containing `"9"` anywhere go to route B, so `"19"` and
/// `"29"` do too. Everything else, an absent Class included, goes to route A.
///
/// # Examples
///
/// ```
/// use markguard_assessor::route_for;
/// use markguard_domain::{Field, Record, RouteId};
///
/// assert_eq!(route_for(&Record::default().with(Field::Class, " 9 ")), RouteId::B);
/// assert_eq!(route_for(&Record::default().with(Field::Class, "42")), RouteId::A);
/// assert_eq!(route_for(&Record::default()), RouteId::A);
/// ```
pub fn route_for(record: &Record) -> RouteId {
    match record.get(Field::Class) {
        Some(class) if class.trim().contains(TARGET_CLASS_MARKER) => RouteId::B,
        _ => RouteId::A,
    }
}
