//! Records whose fields can be populated from a registry.

use core::fmt;

use super::DynSlot;

/// A target that [`Registry::apply`](crate::Registry::apply) can populate.
///
/// Records describe their fields through a [`Manifest`]. The usual way to
/// implement this trait is `#[derive(Inject)]`:
///
/// ```
/// use std::sync::Arc;
/// use wiring_registry::{Inject, Registry};
///
/// trait Clock: Send + Sync { fn now(&self) -> u64; }
/// struct Fixed(u64);
/// impl Clock for Fixed { fn now(&self) -> u64 { self.0 } }
///
/// #[derive(Default, Inject)]
/// struct Handler {
///     #[inject("clock")]
///     clock: Option<Arc<dyn Clock>>,
///     #[inject]
///     port: Option<Arc<u16>>,
///     hits: u64,
/// }
///
/// let registry = Registry::new();
/// registry.register("port", 8080_u16);
/// registry.register("clock", Fixed(7));
/// registry.implements::<Fixed, dyn Clock>(|v| v);
///
/// let mut handler = Handler::default();
/// registry.apply(&mut handler).unwrap();
/// assert_eq!(handler.clock.unwrap().now(), 7);
/// assert_eq!(handler.port.as_deref(), Some(&8080));
/// ```
///
/// Values that are not records implement `Inject` by reporting
/// [`Manifest::Opaque`], which makes `apply` fail with
/// [`InjectError::InvalidTarget`](crate::InjectError::InvalidTarget).
pub trait Inject {
    /// Lists the fields of this target in declaration order.
    fn manifest(&mut self) -> Manifest<'_>;
}

/// The field layout of an [`Inject`] target.
pub enum Manifest<'a> {
    /// A record with fields in declaration order.
    Record {
        /// The record type name.
        type_name: &'static str,
        /// The fields, in declaration order.
        fields: Vec<Field<'a>>,
    },
    /// A value without fields.
    Opaque {
        /// The value's type name.
        type_name: &'static str,
    },
}

impl<'a> Manifest<'a> {
    /// Describes a record.
    #[must_use]
    pub fn record(type_name: &'static str, fields: Vec<Field<'a>>) -> Self {
        Self::Record { type_name, fields }
    }

    /// Describes a value without fields.
    #[must_use]
    pub fn opaque(type_name: &'static str) -> Self {
        Self::Opaque { type_name }
    }

    /// Returns the described type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Record { type_name, .. } | Self::Opaque { type_name } => type_name,
        }
    }
}

/// One field of a record.
pub struct Field<'a> {
    name: &'static str,
    binding: Option<Binding<'a>>,
}

/// A field's binding name and destination.
struct Binding<'a> {
    name: &'static str,
    slot: &'a mut dyn DynSlot,
}

impl<'a> Field<'a> {
    /// A field bound to the registry entry named `binding`.
    pub fn bound(name: &'static str, binding: &'static str, slot: &'a mut dyn DynSlot) -> Self {
        Self {
            name,
            binding: Some(Binding {
                name: binding,
                slot,
            }),
        }
    }

    /// A field the registry never writes.
    #[must_use]
    pub fn unbound(name: &'static str) -> Self {
        Self {
            name,
            binding: None,
        }
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The binding name, if the field is bound.
    #[must_use]
    pub fn binding(&self) -> Option<&'static str> {
        self.binding.as_ref().map(|binding| binding.name)
    }

    /// Returns `true` if the field is bound and its slot accepts a write.
    #[must_use]
    pub fn is_settable(&self) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|binding| binding.slot.settable())
    }

    /// Splits a settable field into its binding name and slot.
    pub(crate) fn into_settable(self) -> Option<(&'static str, &'a mut dyn DynSlot)> {
        self.binding
            .filter(|binding| binding.slot.settable())
            .map(|binding| (binding.name, binding.slot))
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("binding", &self.binding())
            .field("settable", &self.is_settable())
            .finish()
    }
}

impl<T: Inject + ?Sized> Inject for &mut T {
    fn manifest(&mut self) -> Manifest<'_> {
        (**self).manifest()
    }
}

impl<T: Inject + ?Sized> Inject for Box<T> {
    fn manifest(&mut self) -> Manifest<'_> {
        (**self).manifest()
    }
}

macro_rules! impl_opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inject for $ty {
                fn manifest(&mut self) -> Manifest<'_> {
                    Manifest::opaque(core::any::type_name::<Self>())
                }
            }
        )*
    };
}

impl_opaque!(
    (), bool, char, str, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T> Inject for Vec<T> {
    fn manifest(&mut self) -> Manifest<'_> {
        Manifest::opaque(core::any::type_name::<Self>())
    }
}
