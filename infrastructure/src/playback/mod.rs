//! Local audio playback

mod command_player;

pub use command_player::CommandAudioPlayer;
