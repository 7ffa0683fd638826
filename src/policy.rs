//! Breaking-change rules.
//!
//! Pure functions that decide whether a single detected change can break an
//! existing client. The differ calls exactly one of these per emitted record.

use crate::change::Constraint;
use crate::tree::Node;

/// Format transitions that change the wire representation. A pair is breaking
/// in either direction.
const BREAKING_FORMAT_CHANGES: &[(&str, &[&str])] = &[
    ("date-time", &["date"]),
    ("email", &["uri", "url"]),
    ("uri", &["email"]),
    ("uuid", &["string"]),
];

/// Where a required-list change was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredContext {
    /// A named schema under `components.schemas`.
    Component,
    /// A schema inline in a response body.
    Response,
}

/// Removing a path, method, response, media type, header, or schema.
pub fn is_removal_breaking() -> bool {
    true
}

/// An addition is breaking only when it puts a new obligation on the caller,
/// i.e. a required parameter or a required request body.
pub fn is_addition_breaking(required: Option<&Node>) -> bool {
    required.is_some_and(Node::is_truthy)
}

/// Dropping a parameter breaks callers only if they were obliged to send it.
pub fn is_parameter_removal_breaking(required: Option<&Node>) -> bool {
    required.is_some_and(Node::is_truthy)
}

/// Type changes are breaking in both directions.
pub fn is_type_change_breaking() -> bool {
    true
}

/// A format change is breaking when the pair is listed in the format table,
/// in either direction.
///
/// Introducing or dropping a format is never breaking; only a switch from one
/// format to another can be.
///
/// # Arguments
///
/// * `old` - The previous `format` value, if any
/// * `new` - The current `format` value, if any
///
/// # Examples
///
/// ```
/// use oapi_diff::policy::is_format_change_breaking;
///
/// assert!(is_format_change_breaking(Some("date-time"), Some("date")));
/// assert!(is_format_change_breaking(Some("date"), Some("date-time")));
/// assert!(!is_format_change_breaking(Some("int32"), Some("int64")));
/// assert!(!is_format_change_breaking(None, Some("uuid")));
/// ```
pub fn is_format_change_breaking(old: Option<&str>, new: Option<&str>) -> bool {
    let (Some(old), Some(new)) = (old, new) else {
        return false;
    };
    breaks_format(old, new) || breaks_format(new, old)
}

fn breaks_format(from: &str, to: &str) -> bool {
    BREAKING_FORMAT_CHANGES
        .iter()
        .any(|(source, targets)| *source == from && targets.contains(&to))
}

/// A constraint change is breaking when the new value is more restrictive.
///
/// Bounds only compare when both sides are numbers; adding or dropping a bound
/// is not reported as breaking. Any change to `pattern` is breaking.
pub fn is_constraint_change_breaking(
    constraint: Constraint,
    old: Option<&Node>,
    new: Option<&Node>,
) -> bool {
    let bounds = old
        .and_then(Node::as_f64)
        .zip(new.and_then(Node::as_f64));

    match constraint {
        Constraint::Pattern => old != new,
        Constraint::Minimum | Constraint::MinLength | Constraint::MinItems => {
            bounds.is_some_and(|(old, new)| new > old)
        }
        Constraint::Maximum | Constraint::MaxLength | Constraint::MaxItems => {
            bounds.is_some_and(|(old, new)| new < old)
        }
    }
}

/// Optional to required is breaking; required to optional is not.
/// A parameter's `required` flag change is breaking only when it turns on.
pub fn is_required_flip_breaking(old: Option<&Node>, new: Option<&Node>) -> bool {
    let was_required = old.is_some_and(Node::is_truthy);
    let now_required = new.is_some_and(Node::is_truthy);
    now_required && !was_required
}

/// Narrowing an enum is breaking; only adding values is not.
pub fn is_enum_change_breaking(removed_values: &[Node]) -> bool {
    !removed_values.is_empty()
}

/// A property that becomes required binds callers of a component schema but
/// not readers of a response body.
pub fn is_now_required_breaking(context: RequiredContext) -> bool {
    match context {
        RequiredContext::Component => true,
        RequiredContext::Response => false,
    }
}

/// A property that stops being required is never breaking.
pub fn is_no_longer_required_breaking() -> bool {
    false
}

/// Removing a property is breaking when the old schema required it.
pub fn is_property_removal_breaking(was_required: bool) -> bool {
    was_required
}

/// The values removed from and added to an enum.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumDelta {
    pub removed: Vec<Node>,
    pub added: Vec<Node>,
}

/// Computes the enum delta, or `None` if the two enums hold the same values.
///
/// A missing or non-array enum counts as empty once the lists are known to
/// differ.
pub fn enum_delta(old: Option<&Node>, new: Option<&Node>) -> Option<EnumDelta> {
    let old = old.and_then(Node::as_array);
    let new = new.and_then(Node::as_array);

    let differs = match (old, new) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => true,
        (Some(a), Some(b)) => a.len() != b.len() || !a.iter().all(|item| b.contains(item)),
    };
    if !differs {
        return None;
    }

    let old = old.unwrap_or_default();
    let new = new.unwrap_or_default();
    let delta = EnumDelta {
        removed: old.iter().filter(|v| !new.contains(v)).cloned().collect(),
        added: new.iter().filter(|v| !old.contains(v)).cloned().collect(),
    };

    if delta.removed.is_empty() && delta.added.is_empty() {
        None
    } else {
        Some(delta)
    }
}
