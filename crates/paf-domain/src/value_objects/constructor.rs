//! Constructor descriptions supplied by the host

use std::fmt;

use super::TypeKey;

/// One declared constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    ty: TypeKey,
    name: String,
}

impl ParameterInfo {
    /// Create a parameter description
    pub fn new<S: Into<String>>(ty: TypeKey, name: S) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }

    /// Declared parameter type
    pub fn ty(&self) -> TypeKey {
        self.ty
    }

    /// Declared parameter name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The constructor the host selected for a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorInfo {
    declaring_type: TypeKey,
    parameters: Vec<ParameterInfo>,
}

impl ConstructorInfo {
    /// Create a constructor description
    pub fn new(declaring_type: TypeKey, parameters: Vec<ParameterInfo>) -> Self {
        Self {
            declaring_type,
            parameters,
        }
    }

    /// Type the constructor builds
    pub fn declaring_type(&self) -> TypeKey {
        self.declaring_type
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    /// Number of parameters declared with exactly `ty`
    pub fn count_parameters_of(&self, ty: TypeKey) -> usize {
        self.parameters.iter().filter(|p| p.ty == ty).count()
    }

    /// Render `path::Type(path::Param name, ...)`
    pub fn signature(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.ty.name(), p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.declaring_type.name(), parameters)
    }
}

impl fmt::Display for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}
