pub mod access_jwt;
pub mod factory;
pub mod jwt;
pub mod password;
pub mod subject;
pub mod token_issuer;

pub use access_jwt::{AccessJwtError, AuthService, VerifiedAccessToken};
pub use factory::{build_auth_service, build_token_issuer};
pub use subject::SubjectId;
pub use token_issuer::{IssuedAccessToken, TokenIssuer};
