use std::fmt;

/// A TypeScript type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TsType {
    Any,
    Array(Box<TsType>),
    Boolean,
    Function {
        params: Vec<(String, TsType)>,
        return_type: Box<TsType>,
    },
    Null,
    Number,
    Reference {
        name: String,
        type_args: Vec<TsType>,
    },
    String,
    Undefined,
    Union(Vec<TsType>),
}
impl TsType {
    pub fn array(element: TsType) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn generic(name: impl Into<String>, type_args: Vec<TsType>) -> Self {
        Self::Reference {
            name: name.into(),
            type_args,
        }
    }

    /// `Maybe<inner>`, the optional wrapper exported by the shared module.
    pub fn maybe(inner: TsType) -> Self {
        Self::generic("Maybe", vec![inner])
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::generic(name, vec![])
    }

    /// The referenced type name, if this is a reference.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            Self::Reference { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}
impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Array(element) => match element.as_ref() {
                Self::Function { .. } | Self::Union(_) => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
            Self::Boolean => f.write_str("boolean"),
            Self::Function { params, return_type } => {
                let params = params.iter()
                    .map(|(name, ty)| format!("{name}: {ty}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "({params}) => {return_type}")
            },
            Self::Null => f.write_str("null"),
            Self::Number => f.write_str("number"),
            Self::Reference { name, type_args } if type_args.is_empty() =>
                f.write_str(name),
            Self::Reference { name, type_args } => {
                let type_args = type_args.iter()
                    .map(|ty| ty.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{name}<{type_args}>")
            },
            Self::String => f.write_str("string"),
            Self::Undefined => f.write_str("undefined"),
            Self::Union(members) => {
                let members = members.iter()
                    .map(|ty| ty.to_string())
                    .collect::<Vec<_>>()
                    .join(" | ");
                f.write_str(&members)
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySignature {
    pub doc: Option<String>,
    pub name: String,
    pub ty: TsType,
}

/// An exported top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TsDeclaration {
    Interface {
        doc: Option<String>,
        extends: Vec<String>,
        members: Vec<PropertySignature>,
        name: String,
    },
    TypeAlias {
        doc: Option<String>,
        name: String,
        ty: TsType,
        type_params: Vec<String>,
    },
}
impl TsDeclaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Interface { name, .. } => name,
            Self::TypeAlias { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub alias: Option<String>,
    pub name: String,
}
impl ImportSpecifier {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub default_import: Option<String>,
    pub named: Vec<ImportSpecifier>,
    pub source: String,
}

/// One generated TypeScript source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TsModule {
    pub declarations: Vec<TsDeclaration>,
    pub imports: Vec<ImportDeclaration>,
}
