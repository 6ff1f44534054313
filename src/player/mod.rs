pub mod controller;
pub mod mpv;

pub use controller::{EndOfTrack, MediaCommand, PlaybackController, PlaybackMode, VolumeLevel};
pub use mpv::MpvHandle;
