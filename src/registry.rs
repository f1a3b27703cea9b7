use serde::Serialize;

/// Entry in the model listing, in the OpenAI `/v1/models` shape.
#[derive(Debug, Clone, Serialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub object: String,
    pub owned_by: String,
}

impl ModelDescriptor {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: "model".to_string(),
            owned_by: "organization_owner".to_string(),
        }
    }
}

/// Immutable mapping of the model identifiers this gateway accepts.
///
/// Built once from configuration at startup and shared read-only across
/// request handlers; requests naming any other model are rejected before an
/// outbound call is made.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// Build the registry from configured identifiers, preserving order and
    /// ignoring duplicates.
    pub fn from_ids<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut models: Vec<ModelDescriptor> = Vec::new();
        for id in ids {
            if !models.iter().any(|m| m.id == id) {
                models.push(ModelDescriptor::new(id));
            }
        }
        Self { models }
    }

    pub fn get(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn descriptors(&self) -> &[ModelDescriptor] {
        &self.models
    }
}
