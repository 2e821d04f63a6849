//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod adoptions;
pub mod auth;
pub mod campaigns;
pub mod donations;
pub mod health;
pub mod pets;
pub mod users;

pub use admin::{
    admin_delete_campaign_handler, admin_delete_pet_handler, admin_delete_user_handler,
    admin_list_campaigns_handler, admin_list_pets_handler, admin_list_users_handler,
    admin_set_campaign_paused_handler, admin_set_pet_adopted_handler, ban_user_handler,
    promote_user_handler,
};
pub use adoptions::{
    create_adoption_handler, list_adoption_requests_handler, update_adoption_request_handler,
};
pub use auth::issue_token_handler;
pub use campaigns::{
    campaign_donators_handler, create_campaign_handler, get_campaign_handler,
    list_campaigns_handler, toggle_pause_handler, update_campaign_handler,
    user_campaigns_handler,
};
pub use donations::{donate_handler, my_donations_handler, refund_handler};
pub use health::health_handler;
pub use pets::{
    create_pet_handler, delete_pet_handler, get_pet_handler, list_pets_handler,
    set_adopted_handler, update_pet_handler, user_pets_handler,
};
pub use users::{current_user_handler, register_user_handler};
