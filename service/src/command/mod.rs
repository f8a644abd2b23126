//! [`Command`] definitions.

pub mod authorize_admin_session;
pub mod create_admin;
pub mod create_admin_session;
pub mod create_building;
pub mod create_city;
pub mod create_unit;
pub mod delete_admin_session;
pub mod delete_building;
pub mod delete_city;
pub mod delete_inquiry;
pub mod delete_unit;
pub mod edit_building_timeline;
pub mod log_search_query;
pub mod submit_inquiry;
pub mod update_building;
pub mod update_city;
pub mod update_unit;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_admin_session::AuthorizeAdminSession, create_admin::CreateAdmin,
    create_admin_session::CreateAdminSession,
    create_building::CreateBuilding, create_city::CreateCity,
    create_unit::CreateUnit, delete_admin_session::DeleteAdminSession,
    delete_building::DeleteBuilding, delete_city::DeleteCity,
    delete_inquiry::DeleteInquiry, delete_unit::DeleteUnit,
    edit_building_timeline::EditBuildingTimeline,
    log_search_query::LogSearchQuery, submit_inquiry::SubmitInquiry,
    update_building::UpdateBuilding, update_city::UpdateCity,
    update_unit::UpdateUnit,
};
