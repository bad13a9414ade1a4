// src/services/plans.rs

use crate::models::plan::{CreatePlanPayload, Plan, PlansListParams, UpdatePlanPayload};
use crate::services::resource::{Resource, ResourceService};

pub struct Plans;

impl Resource for Plans {
    type Id = i64;
    type Entity = Plan;
    type Create = CreatePlanPayload;
    type Update = UpdatePlanPayload;
    type ListParams = PlansListParams;

    fn path() -> &'static str {
        "/api/admin/plans"
    }

    fn singular() -> &'static str {
        "plan"
    }

    fn plural() -> &'static str {
        "plans"
    }

    fn id_of(entity: &Plan) -> i64 {
        entity.id
    }

    fn display_name(entity: &Plan) -> String {
        entity.name.clone()
    }
}

pub type PlanService = ResourceService<Plans>;
