use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping; key insertion order is the emission order.
pub type Mapping = IndexMap<String, Document>;

/// Intermediate tree between the workflow generator and the YAML emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Mapping(Mapping),
    Sequence(Vec<Document>),
    String(String),
    Bool(bool),
    Integer(i64),
}

impl Document {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping().and_then(|m| m.get(key))
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Document {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Document {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<Mapping> for Document {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl<T: Into<Document>> From<Vec<T>> for Document {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

/// Builds a [`Document::Mapping`] from `key => value` pairs, keeping their order.
#[macro_export]
macro_rules! mapping {
    () => {
        $crate::document::Document::Mapping($crate::document::Mapping::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::document::Mapping::new();
        $(
            map.insert(::std::string::String::from($key), $crate::document::Document::from($value));
        )+
        $crate::document::Document::Mapping(map)
    }};
}
