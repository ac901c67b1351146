//! Domain types shared by the storefront and the admin panel.

pub mod credentials;
pub mod id;
pub mod price;
pub mod status;

pub use credentials::{Credentials, CredentialsError, Email};
pub use id::*;
pub use price::Price;
pub use status::*;
