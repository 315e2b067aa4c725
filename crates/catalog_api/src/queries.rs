use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Lookup a single catalog image by its numeric primary key.
pub const IMAGE_BY_PK: &str = "\
query imageByPk ($pk: Int!)
{
  imageByPk(pk: $pk) {
    id
  }
}";

/// Lookup catalog images by their currently stored location. Locations are
/// not guaranteed unique on the catalog side, so this may match any number
/// of images.
pub const IMAGES_BY_LOCATION: &str = "\
query imagesByLocation ($location: String!)
{
  imagesByLocation(location: $location) {
    pk
    id
    location
  }
}";

/// Update the stored location of one image. Takes the opaque image id, not
/// the numeric pk.
pub const CHANGE_IMAGE_LOCATION: &str = "\
mutation changeImageLocation ($input: ChangeImageLocationInput!)
{
  changeImageLocation(input: $input) {
    mutated {
      node {
        pk
        location
      }
    }
    failed {
      error
      input
    }
  }
}";

/// Canonical operation payload carried by a `start` frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub variables: Value,
}

impl OperationRequest {
    pub fn new(query: impl Into<String>, variables: Value) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }
}

pub fn image_by_pk_request(pk: i64) -> OperationRequest {
    OperationRequest::new(IMAGE_BY_PK, json!({ "pk": pk }))
}

pub fn images_by_location_request(location: &str) -> OperationRequest {
    OperationRequest::new(IMAGES_BY_LOCATION, json!({ "location": location }))
}

pub fn change_image_location_request(image_id: &str, new_location: &str) -> OperationRequest {
    OperationRequest::new(
        CHANGE_IMAGE_LOCATION,
        json!({
            "input": {
                "imageId": image_id,
                "newLocation": new_location,
            }
        }),
    )
}

/// One catalog image as returned by the lookup operations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub pk: Option<i64>,
    pub id: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageByPkData {
    #[serde(rename = "imageByPk")]
    pub image_by_pk: Option<ImageRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagesByLocationData {
    #[serde(rename = "imagesByLocation", default)]
    pub images_by_location: Vec<ImageRef>,
}

/// Result of the location mutation: affected entries plus an optional list
/// of remote-side failures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MutationOutcome {
    #[serde(default)]
    pub mutated: Option<Vec<MutatedEdge>>,
    #[serde(default)]
    pub failed: Option<Vec<FailedChange>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MutatedEdge {
    pub node: ImageNode,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageNode {
    #[serde(default)]
    pub pk: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FailedChange {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeImageLocationData {
    #[serde(rename = "changeImageLocation")]
    pub change_image_location: MutationOutcome,
}

impl MutationOutcome {
    /// The confirmed location of the first mutated entry, present only when
    /// the catalog reported no failure. A `failed` list — even an empty
    /// one — counts as a reported failure.
    pub fn confirmed_location(&self) -> Option<&str> {
        if self.failed.is_some() {
            return None;
        }
        self.mutated
            .as_deref()
            .unwrap_or_default()
            .first()
            .and_then(|edge| edge.node.location.as_deref())
    }
}
