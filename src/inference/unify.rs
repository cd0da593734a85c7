//! Type unification
//!
//! Kinds form a join semilattice with `Null` at the bottom:
//! `Int < Float < String`, `Bool < String`, `DateTime < String`.
//! Unification always rounds up, so a unified schema accepts every value it
//! was built from. Shapes lift that lattice structurally; object against
//! non-object has no join and is reported as a conflict.

use tracing::trace;

use super::error::InferenceError;
use super::types::{FieldShape, Fields, Kind};

impl Kind {
    /// Least general kind accommodating both
    pub fn unify(self, other: Kind) -> Kind {
        match (self, other) {
            (a, b) if a == b => a,
            (Kind::Null, other) | (other, Kind::Null) => other,
            (Kind::Int, Kind::Float) | (Kind::Float, Kind::Int) => Kind::Float,
            // Bool and DateTime only join themselves
            _ => Kind::String,
        }
    }

    /// Whether a value of kind `observed` may be stored in a field of this kind
    ///
    /// Null is only accepted by a `Null` field; optionality is a shape concern.
    pub fn accepts(self, observed: Kind) -> bool {
        match observed {
            Kind::Null => self == Kind::Null,
            observed => self.unify(observed) == self,
        }
    }
}

/// Join a parent path and a field name into a dotted path
pub(crate) fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

pub(crate) fn element_path(parent: &str) -> String {
    format!("{}[]", parent)
}

/// Unify two shapes observed for the same field
///
/// `path` names the field in errors and traces.
pub fn unify_shapes(
    left: FieldShape,
    right: FieldShape,
    path: &str,
) -> Result<FieldShape, InferenceError> {
    match (left, right) {
        (FieldShape::Optional(inner), other) => {
            let unified = unify_shapes(*inner, other.into_required(), path)?;
            Ok(FieldShape::optional(unified))
        }
        (other, FieldShape::Optional(inner)) => {
            let unified = unify_shapes(other, *inner, path)?;
            Ok(FieldShape::optional(unified))
        }
        (FieldShape::Primitive(Kind::Null), other) | (other, FieldShape::Primitive(Kind::Null)) => {
            Ok(FieldShape::optional(other))
        }
        (FieldShape::Primitive(a), FieldShape::Primitive(b)) => {
            let unified = a.unify(b);
            if a != b {
                trace!(field = path, from = %a, with = %b, to = %unified, "Widened field kind");
            }
            Ok(FieldShape::Primitive(unified))
        }
        (FieldShape::Array(a), FieldShape::Array(b)) => Ok(FieldShape::Array(Box::new(
            unify_shapes(*a, *b, &element_path(path))?,
        ))),
        (FieldShape::Object(a), FieldShape::Object(b)) => {
            Ok(FieldShape::Object(merge_fields(a, b, path)?))
        }
        (left, right) => Err(InferenceError::ShapeConflict {
            path: path.to_string(),
            left,
            right,
        }),
    }
}

/// Report the first conflict `merge_fields` would hit, without consuming
/// either side
pub(crate) fn check_fields(
    left: &Fields,
    right: &Fields,
    path: &str,
) -> Result<(), InferenceError> {
    for (name, shape) in left {
        if let Some(other) = right.get(name) {
            check_shapes(shape, other, &child_path(path, name))?;
        }
    }
    Ok(())
}

fn check_shapes(left: &FieldShape, right: &FieldShape, path: &str) -> Result<(), InferenceError> {
    match (left.required(), right.required()) {
        (FieldShape::Primitive(_), FieldShape::Primitive(_)) => Ok(()),
        (FieldShape::Primitive(Kind::Null), _) | (_, FieldShape::Primitive(Kind::Null)) => {
            Ok(())
        }
        (FieldShape::Array(a), FieldShape::Array(b)) => check_shapes(a, b, &element_path(path)),
        (FieldShape::Object(a), FieldShape::Object(b)) => check_fields(a, b, path),
        (left, right) => Err(InferenceError::ShapeConflict {
            path: path.to_string(),
            left: left.clone(),
            right: right.clone(),
        }),
    }
}

/// Merge the fields of two object shapes
///
/// Order is left's fields first, then fields only seen on the right. A field
/// present on one side only becomes optional.
pub fn merge_fields(left: Fields, mut right: Fields, path: &str) -> Result<Fields, InferenceError> {
    let mut merged = Fields::with_capacity(left.len().max(right.len()));

    for (name, shape) in left {
        let field_path = child_path(path, &name);
        let unified = match right.shift_remove(&name) {
            Some(other) => unify_shapes(shape, other, &field_path)?,
            None => FieldShape::optional(shape),
        };
        merged.insert(name, unified);
    }

    for (name, shape) in right {
        merged.insert(name, FieldShape::optional(shape));
    }

    Ok(merged)
}
