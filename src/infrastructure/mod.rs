pub mod media;
pub mod webhook;
pub mod whisper;
