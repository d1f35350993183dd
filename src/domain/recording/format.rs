//! Output format value objects and the format selector

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidFormatError;

/// Prefix of the Format button caption
pub const FORMAT_CAPTION_PREFIX: &str = "Audio Format";

/// Container the capture service writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Mpeg4,
    ThreeGpp,
}

impl ContainerKind {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mpeg4 => "mpeg4",
            Self::ThreeGpp => "3gpp",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audio codec used inside the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCodec {
    /// AMR narrowband, 8kHz speech codec
    AmrNb,
    /// AAC low complexity
    Aac,
}

/// Audio input the capture service reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioSource {
    #[default]
    Microphone,
}

/// One entry of the fixed, ordered list of recording formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Mpeg4,
    ThreeGpp,
}

impl OutputFormat {
    /// All formats in selection order
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Mpeg4, OutputFormat::ThreeGpp];

    /// Human-readable label shown in the format dialog
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mpeg4 => "MPEG 4",
            Self::ThreeGpp => "3GPP",
        }
    }

    /// Container kind handed to the capture service
    pub const fn container(&self) -> ContainerKind {
        match self {
            Self::Mpeg4 => ContainerKind::Mpeg4,
            Self::ThreeGpp => ContainerKind::ThreeGpp,
        }
    }

    /// File extension including the leading dot
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mpeg4 => ".mp4",
            Self::ThreeGpp => ".3gp",
        }
    }

    /// Codec the capture service encodes with for this container
    pub const fn codec(&self) -> AudioCodec {
        match self {
            Self::Mpeg4 => AudioCodec::Aac,
            Self::ThreeGpp => AudioCodec::AmrNb,
        }
    }

    /// Position of this format in [`OutputFormat::ALL`]
    pub const fn index(&self) -> usize {
        match self {
            Self::Mpeg4 => 0,
            Self::ThreeGpp => 1,
        }
    }

    /// Look up a format by its position in the list
    pub fn from_index(index: usize) -> Result<Self, InvalidFormatError> {
        Self::ALL.get(index).copied().ok_or(InvalidFormatError {
            input: index.to_string(),
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = InvalidFormatError;

    /// Accepts the list index or a name: "0", "1", "mp4", ".mp4", "mpeg4", "3gp", ".3gp", "3gpp"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "mp4" | ".mp4" | "mpeg4" | "mpeg 4" => Ok(Self::Mpeg4),
            "1" | "3gp" | ".3gp" | "3gpp" => Ok(Self::ThreeGpp),
            _ => Err(InvalidFormatError {
                input: s.to_string(),
            }),
        }
    }
}

/// Holds the current format choice.
///
/// The choice lives for the process only. Whether it may change is decided
/// by the session state (see `ButtonStates::format`), not here.
#[derive(Debug, Clone, Default)]
pub struct FormatSelector {
    current: OutputFormat,
}

impl FormatSelector {
    /// Create a selector starting at the given format
    pub fn new(initial: OutputFormat) -> Self {
        Self { current: initial }
    }

    /// The formats offered, in order
    pub fn choices(&self) -> &'static [OutputFormat] {
        &OutputFormat::ALL
    }

    /// The selected format
    pub fn current(&self) -> OutputFormat {
        self.current
    }

    /// Index of the selected format
    pub fn index(&self) -> usize {
        self.current.index()
    }

    /// Select a format
    pub fn select(&mut self, format: OutputFormat) {
        self.current = format;
    }

    /// Select by list index
    pub fn select_index(&mut self, index: usize) -> Result<(), InvalidFormatError> {
        self.current = OutputFormat::from_index(index)?;
        Ok(())
    }

    /// Caption of the Format button, e.g. "Audio Format (.mp4)"
    pub fn caption(&self) -> String {
        format!("{} ({})", FORMAT_CAPTION_PREFIX, self.current.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_mpeg4() {
        let selector = FormatSelector::default();
        assert_eq!(selector.current(), OutputFormat::Mpeg4);
        assert_eq!(selector.index(), 0);
    }

    #[test]
    fn list_order_is_fixed() {
        assert_eq!(OutputFormat::ALL[0].extension(), ".mp4");
        assert_eq!(OutputFormat::ALL[1].extension(), ".3gp");
        assert_eq!(OutputFormat::ALL[0].container(), ContainerKind::Mpeg4);
        assert_eq!(OutputFormat::ALL[1].container(), ContainerKind::ThreeGpp);
    }

    #[test]
    fn caption_tracks_selection() {
        let mut selector = FormatSelector::default();
        assert_eq!(selector.caption(), "Audio Format (.mp4)");

        selector.select(OutputFormat::ThreeGpp);
        assert_eq!(selector.caption(), "Audio Format (.3gp)");
    }

    #[test]
    fn select_index_in_range() {
        let mut selector = FormatSelector::default();
        selector.select_index(1).unwrap();
        assert_eq!(selector.current(), OutputFormat::ThreeGpp);
        selector.select_index(0).unwrap();
        assert_eq!(selector.current(), OutputFormat::Mpeg4);
    }

    #[test]
    fn select_index_out_of_range_keeps_choice() {
        let mut selector = FormatSelector::new(OutputFormat::ThreeGpp);
        let err = selector.select_index(2).unwrap_err();
        assert_eq!(err.input, "2");
        assert_eq!(selector.current(), OutputFormat::ThreeGpp);
    }

    #[test]
    fn parse_names_and_indices() {
        assert_eq!("mp4".parse::<OutputFormat>().unwrap(), OutputFormat::Mpeg4);
        assert_eq!(".3gp".parse::<OutputFormat>().unwrap(), OutputFormat::ThreeGpp);
        assert_eq!(" 3GPP ".parse::<OutputFormat>().unwrap(), OutputFormat::ThreeGpp);
        assert_eq!("1".parse::<OutputFormat>().unwrap(), OutputFormat::ThreeGpp);
        assert!("wav".parse::<OutputFormat>().is_err());
        assert!("".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn labels_match_dialog() {
        assert_eq!(OutputFormat::Mpeg4.label(), "MPEG 4");
        assert_eq!(OutputFormat::ThreeGpp.to_string(), "3GPP");
    }
}
