pub mod chirp;
pub mod refresh_token;
pub mod user;

pub use chirp::PostgresChirpRepository;
pub use refresh_token::PostgresRefreshTokenRepository;
pub use user::PostgresUserRepository;
