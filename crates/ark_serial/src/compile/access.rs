use core::any::Any;

use ark_reflect::access::{AccessPath, PathSegment, parse_path};
use ark_reflect::info::{BoxedInfo, NamedField, OptionalInfo, Type, TypeInfo, TypeKind};

use crate::MappingError;

// -----------------------------------------------------------------------------
// AccessStep

/// One hop from a value to a value it contains.
#[derive(Debug, Clone)]
pub enum AccessStep {
    /// Borrows a field of a record.
    Member { owner: Type, field: NamedField },
    /// Walks into an `Option`, constructing the value first if it is `None`.
    Vivify {
        optional: OptionalInfo,
        inner: &'static TypeInfo,
    },
    /// Walks through a `Box`.
    Deref { boxed: BoxedInfo },
}

fn erased_mismatch(expected: Type) -> MappingError {
    MappingError::TypeCastFailure {
        expected: expected.name(),
        actual: "an erased value of another type",
    }
}

impl AccessStep {
    /// Applies the step.
    ///
    /// `Vivify` mutates `value` when the option is empty, even if the caller
    /// only wants to read the leaf.
    pub fn apply<'a>(&self, value: &'a mut dyn Any) -> Result<&'a mut dyn Any, MappingError> {
        match self {
            Self::Member { owner, field } => field
                .get_mut(value)
                .ok_or_else(|| erased_mismatch(*owner)),
            Self::Vivify { optional, inner } => {
                if optional.is_none(value) {
                    let fresh = inner.construct().ok_or(MappingError::ConstructionFailure {
                        ty: inner.type_name(),
                    })?;
                    optional
                        .insert(value, fresh)
                        .map_err(|_| erased_mismatch(inner.ty()))?;
                    log::trace!("constructed an absent `{}`", inner.type_name());
                }
                optional
                    .get_mut(value)
                    .ok_or_else(|| erased_mismatch(inner.ty()))
            }
            Self::Deref { boxed } => boxed
                .deref_mut(value)
                .ok_or_else(|| erased_mismatch(boxed.inner())),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessExpr

/// The steps from a record to the owner of a leaf field, and the leaf.
#[derive(Debug, Clone)]
pub struct AccessExpr {
    root: &'static TypeInfo,
    path: String,
    steps: Vec<AccessStep>,
    leaf: NamedField,
}

impl AccessExpr {
    /// Resolves `path` against the record described by `root`.
    ///
    /// Every segment but the last must name a field whose type, once
    /// `Option` and `Box` wrappers are removed, is a record itself.
    pub fn resolve<'a>(
        root: &'static TypeInfo,
        path: &impl AccessPath<'a>,
    ) -> Result<Self, MappingError> {
        let display = path.display().into_owned();
        let invalid = |reason: String| MappingError::InvalidPath {
            ty: root.type_name(),
            path: display.clone(),
            reason,
        };

        let segments = parse_path(path).map_err(|err| invalid(err.to_string()))?;
        let Some((leaf, intermediates)) = segments.split_last() else {
            return Err(invalid("empty path".into()));
        };

        let mut steps = Vec::with_capacity(intermediates.len() * 2);
        let mut current = root;
        for segment in intermediates {
            let field = find_field(current, segment).map_err(&invalid)?;
            steps.push(AccessStep::Member {
                owner: current.ty(),
                field: field.clone(),
            });
            current = unwrap_intermediate(field.type_info(), &mut steps);
        }
        let leaf = find_field(current, leaf).map_err(&invalid)?.clone();

        Ok(Self {
            root,
            path: display,
            steps,
            leaf,
        })
    }

    /// Returns the information of the record the path starts at.
    #[inline]
    pub fn root(&self) -> &'static TypeInfo {
        self.root
    }

    /// Returns the path as declared.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the steps to the owner of the leaf.
    #[inline]
    pub fn steps(&self) -> &[AccessStep] {
        &self.steps
    }

    /// Returns the leaf field.
    #[inline]
    pub fn leaf(&self) -> &NamedField {
        &self.leaf
    }

    /// Walks from `record` to the owner of the leaf.
    pub fn walk<'a>(&self, record: &'a mut dyn Any) -> Result<&'a mut dyn Any, MappingError> {
        self.steps
            .iter()
            .try_fold(record, |value, step| step.apply(value))
    }

    /// Walks from `record` to the leaf value.
    pub fn walk_leaf<'a>(&self, record: &'a mut dyn Any) -> Result<&'a mut dyn Any, MappingError> {
        let owner = self.walk(record)?;
        let owner_ty = self
            .steps
            .last()
            .map_or(self.root.ty(), step_target);
        self.leaf
            .get_mut(owner)
            .ok_or_else(|| erased_mismatch(owner_ty))
    }
}

fn step_target(step: &AccessStep) -> Type {
    match step {
        AccessStep::Member { field, .. } => field.ty(),
        AccessStep::Vivify { inner, .. } => inner.ty(),
        AccessStep::Deref { boxed } => boxed.inner(),
    }
}

fn find_field<'i>(
    info: &'i TypeInfo,
    segment: &PathSegment<'_>,
) -> Result<&'i NamedField, String> {
    let Some(fields) = info.as_struct() else {
        return Err(format!(
            "`{}` has no fields, cannot access `{segment}`",
            info.type_name()
        ));
    };
    fields
        .field(&segment.name)
        .ok_or_else(|| format!("`{}` has no field `{segment}`", info.type_name()))
}

// Strips `Option`/`Box` layers of an intermediate value, recording the steps.
fn unwrap_intermediate(
    mut info: &'static TypeInfo,
    steps: &mut Vec<AccessStep>,
) -> &'static TypeInfo {
    loop {
        match info.kind() {
            TypeKind::Optional(optional) => {
                let inner = optional.inner_info();
                steps.push(AccessStep::Vivify {
                    optional: optional.clone(),
                    inner,
                });
                info = inner;
            }
            TypeKind::Boxed(boxed) => {
                steps.push(AccessStep::Deref {
                    boxed: boxed.clone(),
                });
                info = boxed.inner_info();
            }
            _ => return info,
        }
    }
}

#[cfg(test)]
mod tests {
    use ark_reflect::derive::Record;
    use ark_reflect::info::Typed;

    use super::{AccessExpr, AccessStep};
    use crate::MappingError;

    #[derive(Record, Default, Debug, PartialEq)]
    #[record(default)]
    struct Leaf {
        value: i32,
    }

    #[derive(Record, Default, Debug, PartialEq)]
    #[record(default)]
    struct Middle {
        leaf: Option<Box<Leaf>>,
        name: String,
    }

    #[derive(Record, Default, Debug)]
    #[record(default)]
    struct Root {
        middle: Option<Middle>,
        plain: Middle,
    }

    #[derive(Record)]
    struct NoDefault {
        value: u8,
    }

    #[derive(Record, Default)]
    #[record(default)]
    struct Holder {
        inner: Option<NoDefault>,
    }

    #[test]
    fn resolves_wrappers_into_steps() {
        let expr = AccessExpr::resolve(Root::type_info(), &"middle.leaf.value").unwrap();
        let kinds: Vec<_> = expr
            .steps()
            .iter()
            .map(|step| match step {
                AccessStep::Member { .. } => "member",
                AccessStep::Vivify { .. } => "vivify",
                AccessStep::Deref { .. } => "deref",
            })
            .collect();
        assert_eq!(kinds, ["member", "vivify", "member", "vivify", "deref"]);
        assert_eq!(expr.leaf().name(), "value");
        assert_eq!(expr.path(), "middle.leaf.value");
    }

    #[test]
    fn walking_constructs_absent_intermediates() {
        let expr = AccessExpr::resolve(Root::type_info(), &"middle.leaf.value").unwrap();
        let mut root = Root::default();

        *expr
            .walk_leaf(&mut root)
            .unwrap()
            .downcast_mut::<i32>()
            .unwrap() = 11;

        let middle = root.middle.as_ref().unwrap();
        assert_eq!(middle.leaf.as_deref(), Some(&Leaf { value: 11 }));
    }

    #[test]
    fn existing_intermediates_are_kept() {
        let expr = AccessExpr::resolve(Root::type_info(), &"middle.name").unwrap();
        let mut root = Root {
            middle: Some(Middle {
                leaf: None,
                name: "kept".into(),
            }),
            ..Root::default()
        };
        let name = expr.walk_leaf(&mut root).unwrap();
        assert_eq!(name.downcast_ref::<String>().map(String::as_str), Some("kept"));
    }

    #[test]
    fn invalid_paths() {
        let err = AccessExpr::resolve(Root::type_info(), &"middle.missing").unwrap_err();
        assert!(matches!(err, MappingError::InvalidPath { ref reason, .. } if reason.contains("missing")));

        // Strings are opaque, they never start a nested access.
        let err = AccessExpr::resolve(Root::type_info(), &"plain.name.len").unwrap_err();
        assert!(err.is_configuration());

        assert!(AccessExpr::resolve(Root::type_info(), &"plain..name").is_err());
        assert!(AccessExpr::resolve(Root::type_info(), &"").is_err());
    }

    #[test]
    fn missing_constructor_fails_on_access() {
        // Resolution succeeds, the failure is deferred to the first walk.
        let expr = AccessExpr::resolve(Holder::type_info(), &"inner.value").unwrap();
        let mut holder = Holder::default();
        let err = expr.walk(&mut holder).unwrap_err();
        assert!(matches!(err, MappingError::ConstructionFailure { .. }));
        assert!(holder.inner.is_none());

        holder.inner = Some(NoDefault { value: 3 });
        let value = expr.walk_leaf(&mut holder).unwrap();
        assert_eq!(value.downcast_ref::<u8>(), Some(&3));
    }
}
