mod destination;
mod finalizer;
mod paths;

pub(crate) use paths::TempGuard;

pub use {
    destination::{
        DEFAULT_FILE_NAME_TEMPLATE, default_destination_dir, move_file, output_file_name,
        unique_path,
    },
    finalizer::{Finalizer, OutputTarget, SavedRecording},
    paths::{AUDIO_TEMP_NAME, IntermediatePaths, MUX_OUTPUT_NAME, VIDEO_TEMP_NAME},
};
