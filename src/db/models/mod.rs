mod account_user;
mod document;
mod tenant;

#[allow(unused)]
pub use account_user::*;
#[allow(unused)]
pub use document::*;
#[allow(unused)]
pub use tenant::*;
