pub mod auth;

pub mod users;

pub mod groups;

pub mod people;

pub mod academics;

pub mod attendance;

pub mod fees;

pub mod assessments;

pub mod notifications;

pub mod audit;

pub mod system;

pub use academics::configure_academic_routes;
pub use assessments::configure_assessment_routes;
pub use attendance::configure_attendance_routes;
pub use audit::configure_audit_routes;
pub use auth::configure_auth_routes;
pub use fees::configure_fee_routes;
pub use groups::configure_group_routes;
pub use notifications::configure_notification_routes;
pub use people::configure_people_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
