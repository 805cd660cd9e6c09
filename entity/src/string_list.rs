use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// JSON array of strings, used for recipe tags and ingredient synonyms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}
