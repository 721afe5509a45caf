//! [`Inspect`] for standard library types.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use super::{AccessStrategy, Inspect, Lookup};
use crate::foundation::Value;
use crate::path::Key;

// ============================================================================
// SCALARS
// ============================================================================

macro_rules! inspect_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Inspect for $t {
            fn value(&self) -> Value {
                Value::from(*self)
            }
        }
    )*};
}

inspect_scalar!(
    bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);

impl Inspect for () {
    fn value(&self) -> Value {
        Value::Null
    }
}

impl Inspect for String {
    fn value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn size(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Inspect for &'static str {
    fn value(&self) -> Value {
        Value::from(*self)
    }

    fn size(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Inspect for Cow<'static, str> {
    fn value(&self) -> Value {
        Value::from(self.as_ref())
    }

    fn size(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

// ============================================================================
// WRAPPERS
// ============================================================================

impl<T: Inspect> Inspect for Option<T> {
    fn lookup(&self, key: &Key) -> Lookup<'_> {
        match self {
            Some(inner) => super::lookup(inner, key),
            None => Lookup::Missing,
        }
    }

    fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
        self.as_ref()
            .and_then(|inner| super::resolve_strategy(inner, key))
    }

    fn contains_key(&self, key: &Key) -> Option<bool> {
        match self {
            Some(inner) => super::contains(inner, key),
            None => Some(false),
        }
    }

    fn value(&self) -> Value {
        self.as_ref().map_or(Value::Null, Inspect::value)
    }

    fn size(&self) -> Option<usize> {
        self.as_ref().and_then(Inspect::size)
    }

    fn element_keys(&self) -> Option<Vec<Key>> {
        self.as_ref().and_then(Inspect::element_keys)
    }
}

macro_rules! inspect_pointer {
    ($($ptr:ident),*) => {$(
        inspect_pointer!(@impl [T: Inspect] $ptr<T>);
        inspect_pointer!(@impl [] $ptr<dyn Inspect>);
    )*};
    (@impl [$($generics:tt)*] $t:ty) => {
        impl<$($generics)*> Inspect for $t {
            fn lookup(&self, key: &Key) -> Lookup<'_> {
                let inner: &dyn Inspect = &**self;
                super::lookup(inner, key)
            }

            fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
                let inner: &dyn Inspect = &**self;
                super::resolve_strategy(inner, key)
            }

            fn contains_key(&self, key: &Key) -> Option<bool> {
                let inner: &dyn Inspect = &**self;
                super::contains(inner, key)
            }

            fn value(&self) -> Value {
                (**self).value()
            }

            fn size(&self) -> Option<usize> {
                (**self).size()
            }

            fn element_keys(&self) -> Option<Vec<Key>> {
                (**self).element_keys()
            }

            fn type_name(&self) -> &'static str {
                (**self).type_name()
            }
        }
    };
}

inspect_pointer!(Box, Arc);

// ============================================================================
// SEQUENCES
// ============================================================================

fn index_keys(len: usize) -> Vec<Key> {
    (0..len).map(Key::Index).collect()
}

macro_rules! inspect_sequence {
    ($([$($generics:tt)*] $t:ty),* $(,)?) => {$(
        impl<$($generics)*> Inspect for $t {
            fn lookup(&self, key: &Key) -> Lookup<'_> {
                match key {
                    Key::Index(i) => Lookup::borrowed(self.get(*i).map(|e| e as &dyn Inspect)),
                    _ => Lookup::Unsupported,
                }
            }

            fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
                matches!(key, Key::Index(_)).then_some(AccessStrategy::At)
            }

            fn contains_key(&self, key: &Key) -> Option<bool> {
                match key {
                    Key::Index(i) => Some(*i < self.len()),
                    _ => None,
                }
            }

            fn value(&self) -> Value {
                Value::List(self.iter().map(Inspect::value).collect())
            }

            fn size(&self) -> Option<usize> {
                Some(self.len())
            }

            fn element_keys(&self) -> Option<Vec<Key>> {
                Some(index_keys(self.len()))
            }
        }
    )*};
}

inspect_sequence!(
    [T: Inspect] Vec<T>,
    [T: Inspect] VecDeque<T>,
    [T: Inspect, const N: usize] [T; N],
);

macro_rules! inspect_set {
    ($([$($generics:tt)*] $t:ty),* $(,)?) => {$(
        impl<$($generics)*> Inspect for $t {
            fn lookup(&self, key: &Key) -> Lookup<'_> {
                match key {
                    Key::Index(i) => Lookup::borrowed(self.iter().nth(*i).map(|e| e as &dyn Inspect)),
                    _ => Lookup::Unsupported,
                }
            }

            fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
                matches!(key, Key::Index(_)).then_some(AccessStrategy::Index)
            }

            fn contains_key(&self, key: &Key) -> Option<bool> {
                match key {
                    Key::Index(i) => Some(*i < self.len()),
                    _ => None,
                }
            }

            fn value(&self) -> Value {
                Value::List(self.iter().map(Inspect::value).collect())
            }

            fn size(&self) -> Option<usize> {
                Some(self.len())
            }

            fn element_keys(&self) -> Option<Vec<Key>> {
                Some(index_keys(self.len()))
            }
        }
    )*};
}

inspect_set!(
    [T: Inspect + Eq + Hash, S: BuildHasher + 'static] HashSet<T, S>,
    [T: Inspect + Ord] BTreeSet<T>,
);

// ============================================================================
// MAPS
// ============================================================================

macro_rules! inspect_string_map {
    ($([$($generics:tt)*] $t:ty),* $(,)?) => {$(
        impl<$($generics)*> Inspect for $t {
            fn lookup(&self, key: &Key) -> Lookup<'_> {
                match key {
                    Key::Name(name) => Lookup::borrowed(self.get(&**name).map(|v| v as &dyn Inspect)),
                    _ => Lookup::Unsupported,
                }
            }

            fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
                matches!(key, Key::Name(_)).then_some(AccessStrategy::At)
            }

            fn contains_key(&self, key: &Key) -> Option<bool> {
                match key {
                    Key::Name(name) => Some(self.contains_key(&**name)),
                    _ => None,
                }
            }

            fn value(&self) -> Value {
                Value::Map(self.iter().map(|(k, v)| (k.to_string(), v.value())).collect())
            }

            fn size(&self) -> Option<usize> {
                Some(self.len())
            }

            fn element_keys(&self) -> Option<Vec<Key>> {
                Some(self.keys().map(|k| Key::Name(Cow::Owned(k.to_string()))).collect())
            }
        }
    )*};
}

inspect_string_map!(
    [V: Inspect, S: BuildHasher + 'static] HashMap<String, V, S>,
    [V: Inspect, S: BuildHasher + 'static] HashMap<&'static str, V, S>,
    [V: Inspect, S: BuildHasher + 'static] HashMap<Cow<'static, str>, V, S>,
    [V: Inspect] BTreeMap<String, V>,
    [V: Inspect] BTreeMap<&'static str, V>,
    [V: Inspect] BTreeMap<Cow<'static, str>, V>,
);

macro_rules! inspect_integer_map {
    ($($k:ty),* $(,)?) => {$(
        inspect_integer_map!(@impl [V: Inspect, S: BuildHasher + 'static] HashMap<$k, V, S>, $k);
        inspect_integer_map!(@impl [V: Inspect] BTreeMap<$k, V>, $k);
    )*};
    (@impl [$($generics:tt)*] $t:ty, $k:ty) => {
        impl<$($generics)*> Inspect for $t {
            fn lookup(&self, key: &Key) -> Lookup<'_> {
                match key {
                    Key::Index(i) => match <$k>::try_from(*i) {
                        Ok(k) => Lookup::borrowed(self.get(&k).map(|v| v as &dyn Inspect)),
                        Err(_) => Lookup::Missing,
                    },
                    _ => Lookup::Unsupported,
                }
            }

            fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
                matches!(key, Key::Index(_)).then_some(AccessStrategy::At)
            }

            fn contains_key(&self, key: &Key) -> Option<bool> {
                match key {
                    Key::Index(i) => Some(<$k>::try_from(*i).is_ok_and(|k| self.contains_key(&k))),
                    _ => None,
                }
            }

            fn value(&self) -> Value {
                Value::Map(self.iter().map(|(k, v)| (k.to_string(), v.value())).collect())
            }

            fn size(&self) -> Option<usize> {
                Some(self.len())
            }

            fn element_keys(&self) -> Option<Vec<Key>> {
                Some(
                    self.keys()
                        .filter_map(|k| usize::try_from(*k).ok())
                        .map(Key::Index)
                        .collect(),
                )
            }
        }
    };
}

inspect_integer_map!(i32, i64, u32, u64, usize);

// ============================================================================
// TUPLES
// ============================================================================

macro_rules! inspect_tuple {
    ($len:expr; $($name:ident $idx:tt),+) => {
        impl<$($name: Inspect),+> Inspect for ($($name,)+) {
            fn lookup(&self, key: &Key) -> Lookup<'_> {
                match key {
                    Key::Index(i) => match *i {
                        $($idx => Lookup::borrowed(Some(&self.$idx as &dyn Inspect)),)+
                        _ => Lookup::Missing,
                    },
                    _ => Lookup::Unsupported,
                }
            }

            fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
                matches!(key, Key::Index(_)).then_some(AccessStrategy::Index)
            }

            fn contains_key(&self, key: &Key) -> Option<bool> {
                match key {
                    Key::Index(i) => Some(*i < $len),
                    _ => None,
                }
            }

            fn value(&self) -> Value {
                Value::List(vec![$(self.$idx.value()),+])
            }

            fn size(&self) -> Option<usize> {
                Some($len)
            }

            fn element_keys(&self) -> Option<Vec<Key>> {
                Some(index_keys($len))
            }
        }
    };
}

inspect_tuple!(1; A 0);
inspect_tuple!(2; A 0, B 1);
inspect_tuple!(3; A 0, B 1, C 2);
inspect_tuple!(4; A 0, B 1, C 2, D 3);
inspect_tuple!(5; A 0, B 1, C 2, D 3, E 4);
inspect_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);

// ============================================================================
// VALUE
// ============================================================================

impl Inspect for Value {
    fn lookup(&self, key: &Key) -> Lookup<'_> {
        match (self, key) {
            (Self::Map(map), Key::Name(name)) => {
                Lookup::borrowed(map.get(&**name).map(|v| v as &dyn Inspect))
            }
            (Self::List(list), Key::Index(i)) => {
                Lookup::borrowed(list.get(*i).map(|v| v as &dyn Inspect))
            }
            (Self::Null, _) => Lookup::Missing,
            _ => Lookup::Unsupported,
        }
    }

    fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
        match (self, key) {
            (Self::Map(_), Key::Name(_)) | (Self::List(_), Key::Index(_)) => {
                Some(AccessStrategy::At)
            }
            _ => None,
        }
    }

    fn contains_key(&self, key: &Key) -> Option<bool> {
        match (self, key) {
            (Self::Map(map), Key::Name(name)) => Some(map.contains_key(&**name)),
            (Self::List(list), Key::Index(i)) => Some(*i < list.len()),
            (Self::Null, _) => Some(false),
            _ => None,
        }
    }

    fn value(&self) -> Value {
        self.clone()
    }

    fn size(&self) -> Option<usize> {
        self.len()
    }

    fn element_keys(&self) -> Option<Vec<Key>> {
        match self {
            Self::Map(map) => Some(map.keys().cloned().map(Key::from).collect()),
            Self::List(list) => Some(index_keys(list.len())),
            _ => None,
        }
    }
}
