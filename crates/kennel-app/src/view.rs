//! JSON shapes printed by the CLI, matching the API's field names

use kennel_domain::Dog;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DogView {
    pub id: String,
    pub name: String,
    pub is_good_boi: bool,
}

impl From<Dog> for DogView {
    fn from(dog: Dog) -> Self {
        Self {
            id: dog.id().to_string(),
            name: dog.name().to_string(),
            is_good_boi: dog.is_good_boi(),
        }
    }
}
