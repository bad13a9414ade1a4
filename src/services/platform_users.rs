// src/services/platform_users.rs

use crate::models::platform_user::{
    CreatePlatformUserPayload, PlatformUser, PlatformUsersListParams, UpdatePlatformUserPayload,
};
use crate::services::resource::{Resource, ResourceService};

pub struct PlatformUsers;

impl Resource for PlatformUsers {
    type Id = i64;
    type Entity = PlatformUser;
    type Create = CreatePlatformUserPayload;
    type Update = UpdatePlatformUserPayload;
    type ListParams = PlatformUsersListParams;

    fn path() -> &'static str {
        "/api/platform-users"
    }

    fn singular() -> &'static str {
        "platform user"
    }

    fn plural() -> &'static str {
        "platform users"
    }

    fn id_of(entity: &PlatformUser) -> i64 {
        entity.id
    }

    fn display_name(entity: &PlatformUser) -> String {
        format!("{} <{}>", entity.name, entity.email)
    }
}

pub type PlatformUserService = ResourceService<PlatformUsers>;
