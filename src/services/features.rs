// src/services/features.rs

use crate::models::feature::{
    CreateFeaturePayload, Feature, FeaturesListParams, UpdateFeaturePayload,
};
use crate::services::resource::{Resource, ResourceService};

pub struct Features;

impl Resource for Features {
    type Id = i64;
    type Entity = Feature;
    type Create = CreateFeaturePayload;
    type Update = UpdateFeaturePayload;
    type ListParams = FeaturesListParams;

    fn path() -> &'static str {
        "/api/admin/features"
    }

    fn singular() -> &'static str {
        "feature"
    }

    fn plural() -> &'static str {
        "features"
    }

    fn id_of(entity: &Feature) -> i64 {
        entity.id
    }

    fn has_translations() -> bool {
        true
    }

    fn display_name(entity: &Feature) -> String {
        format!("{} ({})", entity.name, entity.key)
    }
}

pub type FeatureService = ResourceService<Features>;
