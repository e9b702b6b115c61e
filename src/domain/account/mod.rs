use serde::Serialize;

/// Account the converted transactions belong to.
///
/// The name is a colon separated hierarchy such as `Assets:Checking:Joint`.
/// The kind is free text but importers expect one of `Bank`, `Cash`, `CCard`
/// or `Invst`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Account {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    /// Last segment of the hierarchical name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }
}
