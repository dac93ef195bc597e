use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

const VOID_TYPE_NAME: &str = "void";

/// Identity of a concrete type as seen by the interception layer.
///
/// Generic types are always closed: `List<Int32>` and `List<String>` are two different
/// descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Fully qualified name of the type, without its generic arguments
    pub name: String,

    /// Generic arguments of a closed generic type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Create a non generic type descriptor.
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            generic_arguments: vec![],
        }
    }

    /// Create a closed generic type descriptor.
    pub fn generic<T: Into<String>>(name: T, generic_arguments: Vec<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            generic_arguments,
        }
    }

    /// The type of members that do not return anything.
    pub fn void() -> Self {
        Self::new(VOID_TYPE_NAME)
    }

    /// Check if this is the [void][Self::void] type.
    pub fn is_void(&self) -> bool {
        self.name == VOID_TYPE_NAME && self.generic_arguments.is_empty()
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.generic_arguments.is_empty() {
            let arguments = self
                .generic_arguments
                .iter()
                .map(|argument| argument.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "<{arguments}>")?;
        }

        Ok(())
    }
}
