pub mod messages;
pub mod turnstile;

pub use turnstile::TurnstileVerifier;
