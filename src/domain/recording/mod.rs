//! Recording domain module

mod descriptor;
mod format;
mod output_path;

pub use descriptor::RecordingDescriptor;
pub use format::{
    AudioCodec, AudioSource, ContainerKind, FormatSelector, OutputFormat, FORMAT_CAPTION_PREFIX,
};
pub use output_path::{derive_output_path, recordings_dir, RECORDINGS_FOLDER};
