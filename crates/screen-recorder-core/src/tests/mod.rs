mod audio;
mod clock;
mod ffmpeg;
mod region;
