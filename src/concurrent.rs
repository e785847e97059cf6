mod cancellation_token;

pub use self::cancellation_token::*;
