use std::path::{Component, Path};

#[derive(Debug, Clone, PartialOrd, Ord)]
/// An absolute path with `.` and `..` segments collapsed and no trailing slash.
pub struct ExpandedPath(String);

impl ExpandedPath {
    /// Generates an expanded path from an given arguments. By default, simply use the "Into" trait.
    pub fn from<T: AsRef<Path>>(value: T) -> Self {
        value.into()
    }

    /// Consumes the path and returns its string form.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> From<T> for ExpandedPath
where
    T: AsRef<Path>,
{
    fn from(path: T) -> Self {
        // Pre-filter components to get an size estimate
        let components: Vec<_> = path
            .as_ref()
            .components()
            .filter_map(|component| match component {
                Component::Normal(raw_path) => match raw_path.to_str() {
                    Some(value) => Some(Some(value.to_string())),
                    None => None,
                },
                Component::ParentDir => Some(None),
                _ => None,
            })
            .collect();

        // Remove parents inside
        let mut parts = Vec::with_capacity(components.len());
        for component in components {
            match component {
                Some(value) => {
                    parts.push(value);
                }
                None => {
                    parts.pop();
                }
            }
        }

        ExpandedPath(format!("/{}", parts.join("/")))
    }
}

impl AsRef<str> for ExpandedPath {
    fn as_ref(&self) -> &str {
        return self.0.as_str();
    }
}

impl<T> PartialEq<T> for ExpandedPath
where
    T: AsRef<str>,
{
    fn eq(&self, other: &T) -> bool {
        self.0.as_str() == other.as_ref()
    }
}

impl Eq for ExpandedPath {}
