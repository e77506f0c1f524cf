use serde::{Deserialize, Serialize};

/// Locally persisted identity record. This is a mock stand-in for a real
/// account system; there are no credentials and no verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
}
