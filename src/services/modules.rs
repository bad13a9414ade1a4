// src/services/modules.rs

use validator::ValidationErrors;

use crate::models::module::{CreateModulePayload, Module, ModulesListParams, UpdateModulePayload};
use crate::services::resource::{validate_with_optional_key, Resource, ResourceService};

pub struct Modules;

impl Resource for Modules {
    type Id = i64;
    type Entity = Module;
    type Create = CreateModulePayload;
    type Update = UpdateModulePayload;
    type ListParams = ModulesListParams;

    fn path() -> &'static str {
        "/api/admin/modules"
    }

    fn singular() -> &'static str {
        "module"
    }

    fn plural() -> &'static str {
        "modules"
    }

    fn id_of(entity: &Module) -> i64 {
        entity.id
    }

    fn has_translations() -> bool {
        true
    }

    fn display_name(entity: &Module) -> String {
        format!("{} ({})", entity.name, entity.key)
    }

    fn validate_update(payload: &UpdateModulePayload) -> Result<(), ValidationErrors> {
        validate_with_optional_key(payload, "key", payload.key.as_deref())
    }
}

pub type ModuleService = ResourceService<Modules>;
