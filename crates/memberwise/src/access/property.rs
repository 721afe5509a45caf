//! Property registry
//!
//! Structs expose members to validators by registering named properties
//! once, at startup. A property is either a borrowed field, a computed
//! getter or a getter taking arguments, and may carry a setter used by
//! [`set_validated`](crate::adapters::set_validated).
//!
//! The registry is process-wide and keyed by the object's `TypeId` and the
//! property name. Registering the same name twice replaces the earlier
//! definition.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_memberwise::prelude::*;
//!
//! struct User { name: String, tags: Vec<String> }
//!
//! Property::<User>::field("name", |u| &u.name)
//!     .setter(|u, name: String| u.name = name)
//!     .register();
//! Property::<User>::getter("tag_count", |u| u.tags.len()).register();
//! ```

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::debug;

use super::{Inspect, Lookup, Member};
use crate::foundation::{ConversionError, Error, Value};
use crate::path::Key;

// ============================================================================
// ERASED ACCESSORS
// ============================================================================

trait ReadField: Send + Sync {
    fn read<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Inspect>;
}

trait ReadValue: Send + Sync {
    fn read(&self, object: &dyn Any, args: &[Value]) -> Option<Value>;
}

trait WriteValue: Send + Sync {
    fn write(&self, object: &mut dyn Any, value: Value) -> Result<(), ConversionError>;
}

struct FieldFn<T, U, F> {
    accessor: F,
    _marker: PhantomData<fn(&T) -> &U>,
}

impl<T, U, F> ReadField for FieldFn<T, U, F>
where
    T: 'static,
    U: Inspect,
    F: Fn(&T) -> &U + Send + Sync,
{
    fn read<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Inspect> {
        let object = object.downcast_ref::<T>()?;
        Some((self.accessor)(object))
    }
}

struct GetterFn<T, R, F> {
    getter: F,
    _marker: PhantomData<fn(&T) -> R>,
}

impl<T, R, F> ReadValue for GetterFn<T, R, F>
where
    T: 'static,
    R: Into<Value>,
    F: Fn(&T, &[Value]) -> Option<R> + Send + Sync,
{
    fn read(&self, object: &dyn Any, args: &[Value]) -> Option<Value> {
        let object = object.downcast_ref::<T>()?;
        (self.getter)(object, args).map(Into::into)
    }
}

struct SetterFn<T, V, F> {
    setter: F,
    _marker: PhantomData<fn(&mut T, V)>,
}

impl<T, V, F> WriteValue for SetterFn<T, V, F>
where
    T: 'static,
    V: TryFrom<Value>,
    V::Error: Into<ConversionError>,
    F: Fn(&mut T, V) + Send + Sync,
{
    fn write(&self, object: &mut dyn Any, value: Value) -> Result<(), ConversionError> {
        let found = value.kind();
        let converted = V::try_from(value).map_err(Into::into)?;
        let object = object.downcast_mut::<T>().ok_or(ConversionError {
            expected: std::any::type_name::<T>(),
            found,
        })?;
        (self.setter)(object, converted);
        Ok(())
    }
}

#[derive(Clone)]
enum Reader {
    Field(Arc<dyn ReadField>),
    Getter(Arc<dyn ReadValue>),
}

// ============================================================================
// REGISTRY
// ============================================================================

/// One registered property.
#[derive(Clone)]
pub(crate) struct PropertyEntry {
    name: Cow<'static, str>,
    reader: Reader,
    writer: Option<Arc<dyn WriteValue>>,
}

impl fmt::Debug for PropertyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("name", &self.name)
            .field("settable", &self.writer.is_some())
            .finish_non_exhaustive()
    }
}

impl PropertyEntry {
    pub(crate) fn read<'a>(&self, object: &'a dyn Inspect, key: &Key) -> Lookup<'a> {
        match &self.reader {
            Reader::Field(field) => Lookup::borrowed(field.read(object.as_any())),
            Reader::Getter(getter) => {
                let args = match key {
                    Key::Property(property) => match property.arg_values() {
                        Some(args) => args,
                        None => return Lookup::Unsupported,
                    },
                    _ => Vec::new(),
                };
                getter
                    .read(object.as_any(), &args)
                    .map_or(Lookup::Missing, |value| {
                        Lookup::Found(Member::Owned(Box::new(value)))
                    })
            }
        }
    }

    fn write(&self, object: &mut dyn Any, type_name: &'static str, value: Value) -> Result<(), Error> {
        let writer = self.writer.as_ref().ok_or_else(|| Error::NoSetter {
            type_name,
            property: self.name.to_string(),
        })?;
        writer.write(object, value).map_err(|source| Error::Conversion {
            property: self.name.to_string(),
            source,
        })
    }

    pub(crate) fn is_settable(&self) -> bool {
        self.writer.is_some()
    }
}

type TypeProperties = HashMap<Cow<'static, str>, Arc<PropertyEntry>>;

static REGISTRY: LazyLock<RwLock<HashMap<TypeId, TypeProperties>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn entry_for(type_id: TypeId, name: &str) -> Option<Arc<PropertyEntry>> {
    REGISTRY
        .read()
        .get(&type_id)
        .and_then(|props| props.get(name))
        .cloned()
}

/// Registered property serving `key` on `object`, if any.
pub(crate) fn lookup_entry(object: &dyn Inspect, key: &Key) -> Option<Arc<PropertyEntry>> {
    let name = match key {
        Key::Name(name) => &**name,
        Key::Property(property) => &*property.name,
        _ => return None,
    };
    entry_for(Any::type_id(object.as_any()), name)
}

/// Registered property `name` of type `T`.
pub(crate) fn entry_of<T: 'static>(name: &str) -> Result<Arc<PropertyEntry>, Error> {
    entry_for(TypeId::of::<T>(), name).ok_or_else(|| Error::UnknownProperty {
        type_name: std::any::type_name::<T>(),
        property: name.to_owned(),
    })
}

/// Returns true if `T` has a property called `name`.
#[must_use]
pub fn is_registered<T: 'static>(name: &str) -> bool {
    entry_for(TypeId::of::<T>(), name).is_some()
}

/// Names of all properties registered for `T`, sorted.
#[must_use]
pub fn property_names<T: 'static>() -> Vec<String> {
    let registry = REGISTRY.read();
    let mut names: Vec<String> = registry
        .get(&TypeId::of::<T>())
        .map(|props| props.keys().map(ToString::to_string).collect())
        .unwrap_or_default();
    names.sort();
    names
}

/// Collects every argument-free property of `object` into a map.
///
/// Used as the comparison value of structs implemented through
/// [`inspect_by_properties!`](crate::inspect_by_properties).
#[must_use]
pub fn snapshot(object: &dyn Inspect) -> Value {
    let entries: Vec<Arc<PropertyEntry>> = REGISTRY
        .read()
        .get(&Any::type_id(object.as_any()))
        .map(|props| props.values().cloned().collect())
        .unwrap_or_default();

    let map: BTreeMap<String, Value> = entries
        .iter()
        .filter_map(|entry| {
            let key = Key::Name(entry.name.clone());
            match entry.read(object, &key) {
                Lookup::Found(member) => Some((entry.name.to_string(), member.value())),
                _ => None,
            }
        })
        .collect();
    Value::Map(map)
}

/// Assigns `value` to the registered property `name` of `object`.
///
/// The value is converted before the object is touched, so a failed
/// conversion leaves `object` unchanged.
///
/// # Errors
///
/// Returns [`Error::UnknownProperty`], [`Error::NoSetter`] or
/// [`Error::Conversion`].
pub fn set_property<T: 'static>(object: &mut T, name: &str, value: impl Into<Value>) -> Result<(), Error> {
    let entry = entry_of::<T>(name)?;
    entry.write(object, std::any::type_name::<T>(), value.into())
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for one property of `T`.
#[must_use = "properties take effect only after `register()`"]
pub struct Property<T> {
    entry: PropertyEntry,
    _marker: PhantomData<fn(&T)>,
}

impl<T: 'static> Property<T> {
    /// A property borrowing a member of `T`.
    pub fn field<U, F>(name: impl Into<Cow<'static, str>>, accessor: F) -> Self
    where
        U: Inspect,
        F: Fn(&T) -> &U + Send + Sync + 'static,
    {
        Self::with_reader(
            name,
            Reader::Field(Arc::new(FieldFn {
                accessor,
                _marker: PhantomData,
            })),
        )
    }

    /// A property computed from `T`.
    pub fn getter<R, F>(name: impl Into<Cow<'static, str>>, getter: F) -> Self
    where
        R: Into<Value> + 'static,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        Self::with_reader(
            name,
            Reader::Getter(Arc::new(GetterFn {
                getter: move |object: &T, _: &[Value]| Some(getter(object)),
                _marker: PhantomData,
            })),
        )
    }

    /// A property computed from `T` and call arguments.
    ///
    /// Returning `None` marks the member as missing for these arguments.
    pub fn getter_with_args<R, F>(name: impl Into<Cow<'static, str>>, getter: F) -> Self
    where
        R: Into<Value> + 'static,
        F: Fn(&T, &[Value]) -> Option<R> + Send + Sync + 'static,
    {
        Self::with_reader(
            name,
            Reader::Getter(Arc::new(GetterFn {
                getter,
                _marker: PhantomData,
            })),
        )
    }

    fn with_reader(name: impl Into<Cow<'static, str>>, reader: Reader) -> Self {
        Self {
            entry: PropertyEntry {
                name: name.into(),
                reader,
                writer: None,
            },
            _marker: PhantomData,
        }
    }

    /// Attaches a setter; candidate values are converted through
    /// `TryFrom<Value>`.
    pub fn setter<V, F>(mut self, setter: F) -> Self
    where
        V: TryFrom<Value> + 'static,
        V::Error: Into<ConversionError>,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.entry.writer = Some(Arc::new(SetterFn {
            setter,
            _marker: PhantomData,
        }));
        self
    }

    /// Adds the property to the process-wide registry.
    pub fn register(self) {
        let type_name = std::any::type_name::<T>();
        debug!(
            type_name,
            property = %self.entry.name,
            settable = self.entry.is_settable(),
            "Registering property"
        );
        let mut registry = REGISTRY.write();
        registry
            .entry(TypeId::of::<T>())
            .or_default()
            .insert(self.entry.name.clone(), Arc::new(self.entry));
    }
}

pub(crate) fn write_entry<T: 'static>(
    entry: &PropertyEntry,
    object: &mut T,
    value: Value,
) -> Result<(), Error> {
    entry.write(object, std::any::type_name::<T>(), value)
}

// ============================================================================
// MACROS
// ============================================================================

/// Registers field-backed properties for a struct.
///
/// `name: Type` registers a readable and settable property, a bare `name`
/// registers a read-only one.
///
/// ```rust,ignore
/// declare_properties!(Config => {
///     port: u16,
///     host: String,
///     limits,
/// });
/// ```
#[macro_export]
macro_rules! declare_properties {
    ($ty:ty => { $($field:ident $(: $fty:ty)?),* $(,)? }) => {{
        $(
            $crate::access::Property::<$ty>::field(stringify!($field), |object| &object.$field)
                $(.setter(|object: &mut $ty, value: $fty| object.$field = value))?
                .register();
        )*
    }};
}

/// Implements [`Inspect`](crate::access::Inspect) for a struct whose
/// members are reached only through registered properties.
///
/// The struct's comparison value is the map of its properties.
#[macro_export]
macro_rules! inspect_by_properties {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::access::Inspect for $ty {
            fn value(&self) -> $crate::foundation::Value {
                $crate::access::snapshot(self)
            }
        }
    )+};
}
