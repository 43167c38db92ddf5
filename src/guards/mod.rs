pub mod exclusive;
pub mod profanity;
pub mod reaction;
