// src/services/qualifications.rs

use validator::ValidationErrors;

use crate::models::qualification::{
    CreateQualificationPayload, Qualification, QualificationsListParams,
    UpdateQualificationPayload,
};
use crate::services::resource::{validate_with_optional_key, Resource, ResourceService};

pub struct Qualifications;

impl Resource for Qualifications {
    type Id = i64;
    type Entity = Qualification;
    type Create = CreateQualificationPayload;
    type Update = UpdateQualificationPayload;
    type ListParams = QualificationsListParams;

    fn path() -> &'static str {
        "/api/admin/qualifications"
    }

    fn singular() -> &'static str {
        "qualification"
    }

    fn plural() -> &'static str {
        "qualifications"
    }

    fn id_of(entity: &Qualification) -> i64 {
        entity.id
    }

    fn display_name(entity: &Qualification) -> String {
        format!("{} ({})", entity.name, entity.code)
    }

    fn validate_update(payload: &UpdateQualificationPayload) -> Result<(), ValidationErrors> {
        validate_with_optional_key(payload, "code", payload.code.as_deref())
    }
}

pub type QualificationService = ResourceService<Qualifications>;
