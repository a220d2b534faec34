mod account_user_repository;
mod document_repository;
mod tenant_repository;

pub use account_user_repository::AccountUserRepository;
pub use document_repository::DocumentRepository;
pub use tenant_repository::TenantRepository;
