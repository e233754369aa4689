pub mod calendar;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod sso;

pub use calendar::CalendarPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use sso::SsoPage;
