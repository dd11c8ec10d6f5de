//! Domain status models shared between the server and its clients

mod order;
mod product;
mod tenant;

pub use order::{OrderStatus, PaymentStatus};
pub use product::ProductStatus;
pub use tenant::{SubscriptionStatus, TenantStatus, UserRole};
