pub mod membership_map_user;
pub mod membership_package;
pub mod membership_package_map_sub_user;
pub mod notification;
pub mod notification_map_user;
pub mod payment;
pub mod payment_type;
pub mod report;
pub mod task;
pub mod user;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::membership_map_user::{self, Entity as MembershipMapUser};
    pub use super::membership_package::{self, Entity as MembershipPackage};
    pub use super::membership_package_map_sub_user::{self, Entity as MembershipPackageMapSubUser};
    pub use super::notification::{self, Entity as Notification};
    pub use super::notification_map_user::{self, Entity as NotificationMapUser};
    pub use super::payment::{self, Entity as Payment};
    pub use super::payment_type::{self, Entity as PaymentType};
    pub use super::report::{self, Entity as Report};
    pub use super::task::{self, Entity as Task};
    pub use super::user::{self, Entity as User};
}
