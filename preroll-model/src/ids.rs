use uuid::Uuid;

/// Strongly typed ID for playable media targets registered with the loader.
///
/// Registration dedupe keys off this ID, so hosts must hand the same
/// `ElementId` to every call that refers to the same underlying element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub Uuid);

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementId {
    pub fn new() -> Self {
        ElementId(Uuid::now_v7())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for ElementId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
