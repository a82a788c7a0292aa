//! Stored document shapes and their normalization into `Dog`
//!
//! Stored dogs look like `{ _id: ObjectId, name: string, isGoodBoi: bool }`,
//! but older documents may lack `isGoodBoi` or hold something that is not a
//! boolean. Normalization reports those as `false` instead of failing.
//! Everything here is pure and needs no store.

use kennel_domain::{Dog, DogId, NewDog};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Deserializer, Serialize};

/// Document written on create. The store assigns `_id`.
#[derive(Debug, Serialize)]
pub struct NewDogDocument<'a> {
    pub name: &'a str,
    #[serde(rename = "isGoodBoi")]
    pub is_good_boi: bool,
}

impl<'a> From<&'a NewDog> for NewDogDocument<'a> {
    fn from(new_dog: &'a NewDog) -> Self {
        Self {
            name: new_dog.name(),
            is_good_boi: new_dog.is_good_boi(),
        }
    }
}

impl NewDogDocument<'_> {
    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Document read back from the store
#[derive(Debug, Deserialize)]
pub struct DogDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "isGoodBoi", default, deserialize_with = "bool_or_false")]
    pub is_good_boi: bool,
}

impl From<DogDocument> for Dog {
    fn from(document: DogDocument) -> Self {
        Dog::new(
            DogId::new(document.id.to_hex()),
            document.name,
            document.is_good_boi,
        )
    }
}

/// Present-and-boolean is taken as is; null or any other type is `false`.
/// Absence is handled by `#[serde(default)]`.
fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Bson::deserialize(deserializer)?, Bson::Boolean(true)))
}

/// Decode a raw stored document into a `Dog`.
///
/// Fails only when `_id` is not an ObjectId or `name` is missing or not a
/// string.
pub fn normalize(document: Document) -> Result<Dog, bson::de::Error> {
    bson::from_document::<DogDocument>(document).map(Dog::from)
}
