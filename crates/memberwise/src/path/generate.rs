//! Expansion of generated path segments.

use super::{Aggregation, Arg, Key, Path, PropertyKey};
use crate::foundation::Value;

/// Result of expanding a path with generated segments.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// A path with no generated segments left.
    Concrete {
        /// Path used for resolution.
        path: Path,
        /// Template path with the wildcards kept, used for reporting.
        display: Path,
    },
    /// The container a wildcard iterates over does not exist.
    Missing {
        /// Concrete path of the missing container.
        path: Path,
        /// Template prefix of the missing container.
        display: Path,
    },
    /// One generated segment, expanded.
    Each {
        /// How the children fold.
        aggregation: Aggregation,
        /// Template prefix of the iterated container.
        container: Path,
        /// One expansion per element.
        children: Vec<Generated>,
    },
}

/// Expands `All`, `Any` and [`Arg::Each`] segments of `path`.
///
/// `element_keys` is called with the concrete prefix in front of each
/// wildcard and returns the keys of the container found there, `None` if the
/// prefix does not resolve. Generated property arguments expand over their
/// own range without consulting the object. Expansion proceeds left to
/// right and stops once every segment is concrete, so the recursion depth is
/// bounded by the path length.
///
/// # Errors
///
/// Propagates the first error returned by `element_keys`.
pub fn generate_paths<E, F>(path: &Path, mut element_keys: F) -> Result<Generated, E>
where
    F: FnMut(&Path) -> Result<Option<Vec<Key>>, E>,
{
    expand(path, path.clone(), 0, &mut element_keys)
}

fn expand<E, F>(template: &Path, current: Path, from: usize, element_keys: &mut F) -> Result<Generated, E>
where
    F: FnMut(&Path) -> Result<Option<Vec<Key>>, E>,
{
    let Some(index) = current
        .keys()
        .iter()
        .skip(from)
        .position(Key::is_generated)
        .map(|offset| offset + from)
    else {
        return Ok(Generated::Concrete {
            path: current,
            display: template.clone(),
        });
    };

    match &current.keys()[index] {
        key @ (Key::All | Key::Any) => {
            let aggregation = if matches!(key, Key::All) {
                Aggregation::All
            } else {
                Aggregation::Any
            };
            let container = current.prefix(index);
            let Some(keys) = element_keys(&container)? else {
                return Ok(Generated::Missing {
                    path: container,
                    display: template.prefix(index),
                });
            };
            let children = keys
                .into_iter()
                .map(|key| {
                    let mut next = current.clone();
                    next.replace_key(index, key);
                    expand(template, next, index + 1, element_keys)
                })
                .collect::<Result<Vec<_>, E>>()?;
            Ok(Generated::Each {
                aggregation,
                container: template.prefix(index),
                children,
            })
        }
        Key::Property(property) => {
            let Some((position, from_arg, to_arg, aggregation)) =
                property.args.iter().enumerate().find_map(|(i, arg)| match arg {
                    Arg::Each {
                        from,
                        to,
                        aggregation,
                    } => Some((i, *from, *to, *aggregation)),
                    Arg::Value(_) => None,
                })
            else {
                return expand(template, current, index + 1, element_keys);
            };
            let property = property.clone();
            let children = (from_arg..to_arg)
                .map(|value| {
                    let mut args = property.args.clone();
                    args[position] = Arg::Value(Value::from(value));
                    let mut next = current.clone();
                    next.replace_key(
                        index,
                        Key::Property(PropertyKey {
                            name: property.name.clone(),
                            args,
                        }),
                    );
                    // Same segment again: further generated arguments remain.
                    expand(template, next, index, element_keys)
                })
                .collect::<Result<Vec<_>, E>>()?;
            Ok(Generated::Each {
                aggregation,
                container: template.prefix(index),
                children,
            })
        }
        Key::Name(_) | Key::Index(_) => expand(template, current, index + 1, element_keys),
    }
}

impl Generated {
    /// Concrete paths in expansion order.
    #[must_use]
    pub fn concrete_paths(&self) -> Vec<&Path> {
        let mut out = Vec::new();
        self.collect_concrete(&mut out);
        out
    }

    fn collect_concrete<'a>(&'a self, out: &mut Vec<&'a Path>) {
        match self {
            Self::Concrete { path, .. } => out.push(path),
            Self::Missing { .. } => {}
            Self::Each { children, .. } => {
                for child in children {
                    child.collect_concrete(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::path::PropertyKey;

    fn three_elements(_: &Path) -> Result<Option<Vec<Key>>, Infallible> {
        Ok(Some((0..3).map(Key::Index).collect()))
    }

    #[test]
    fn concrete_path_is_unchanged() {
        let path = Path::from_keys(["a", "b"]);
        let generated = generate_paths(&path, three_elements).unwrap();
        assert_eq!(
            generated,
            Generated::Concrete {
                path: path.clone(),
                display: path
            }
        );
    }

    #[test]
    fn wildcard_expands_per_element() {
        let path = Path::from_keys([Key::from("items"), Key::All, Key::from("name")]);
        let generated = generate_paths(&path, three_elements).unwrap();
        let paths: Vec<String> = generated
            .concrete_paths()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(paths, ["items[0].name", "items[1].name", "items[2].name"]);
        assert!(matches!(
            generated,
            Generated::Each {
                aggregation: Aggregation::All,
                ..
            }
        ));
    }

    #[test]
    fn nested_wildcards_expand_each_dimension() {
        let path = Path::from_keys([Key::All, Key::Any]);
        let generated = generate_paths(&path, three_elements).unwrap();
        assert_eq!(generated.concrete_paths().len(), 9);
    }

    #[test]
    fn missing_container() {
        let path = Path::from_keys([Key::from("items"), Key::All]);
        let generated =
            generate_paths(&path, |_| Ok::<_, Infallible>(None)).unwrap();
        assert!(matches!(generated, Generated::Missing { .. }));
    }

    #[test]
    fn each_argument_expands_over_range() {
        let path = Path::from_keys([Key::Property(PropertyKey::with_args(
            "child",
            [Arg::each(1, 3)],
        ))]);
        let generated = generate_paths(&path, three_elements).unwrap();
        let paths: Vec<String> = generated
            .concrete_paths()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(paths, ["child(1)", "child(2)"]);
    }

    #[test]
    fn errors_propagate() {
        let path = Path::from_keys([Key::All]);
        let result = generate_paths(&path, |_| Err::<Option<Vec<Key>>, _>("unsupported"));
        assert_eq!(result, Err("unsupported"));
    }
}
