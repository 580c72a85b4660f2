use std::fmt;

/// How the value of a query component is obtained from another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Provenance {
    /// A default declared in the schema.
    DefaultValueProvided,
    /// A variable of the request.
    VariableValueProvided,
    /// A literal written in the request.
    RawInputProvided,
    /// A field of a result fetched from an upstream source.
    ExtractedFromSource,
    /// The element type of a list.
    ElementType,
}

impl Provenance {
    pub const ALL: [Provenance; 5] = [
        Provenance::DefaultValueProvided,
        Provenance::VariableValueProvided,
        Provenance::RawInputProvided,
        Provenance::ExtractedFromSource,
        Provenance::ElementType,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Provenance::DefaultValueProvided => "default_value_provided",
            Provenance::VariableValueProvided => "variable_value_provided",
            Provenance::RawInputProvided => "raw_input_provided",
            Provenance::ExtractedFromSource => "extracted_from_source",
            Provenance::ElementType => "element_type",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of a request plan: a selected field, or an argument of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryComponent {
    Field { name: String },
    Argument { name: String },
}

impl QueryComponent {
    pub fn field(name: impl Into<String>) -> Self {
        QueryComponent::Field { name: name.into() }
    }

    pub fn argument(name: impl Into<String>) -> Self {
        QueryComponent::Argument { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            QueryComponent::Field { name } | QueryComponent::Argument { name } => name,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, QueryComponent::Field { .. })
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, QueryComponent::Argument { .. })
    }
}
