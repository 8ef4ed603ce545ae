//! Generator configuration.

use bitflags::bitflags;
use holdgen_core::ArtifactHash;
use holdgen_template::{FormatStyle, PatternFormatter};

bitflags! {
    /// Serialization formats generated types should support.
    ///
    /// Each flag adds attribute lines to holder and value-object output. The
    /// flags are recorded in every descriptor, so toggling one regenerates
    /// the affected artifacts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SerializationSupport: u8 {
        const JSON = 1 << 0;
        const MESSAGE_PACK = 1 << 1;
        const XML = 1 << 2;
    }
}

impl SerializationSupport {
    /// Whether any flag needs serde derives.
    pub fn needs_serde(self) -> bool {
        !self.is_empty()
    }
}

/// Options shared by every generator in a pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratorOptions {
    pub serialization: SerializationSupport,
    /// Emit an "auto-generated" banner at the top of each file.
    pub header: bool,
    /// Name and version of the tool driving generation. Changing it invalidates all cached output.
    pub toolchain: String,
    pub style: FormatStyle,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            serialization: SerializationSupport::empty(),
            header: true,
            toolchain: concat!("holdgen ", env!("CARGO_PKG_VERSION")).to_string(),
            style: FormatStyle::Robust,
        }
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_serialization(mut self, serialization: SerializationSupport) -> Self {
        self.serialization = serialization;
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.toolchain = toolchain.into();
        self
    }

    pub fn with_style(mut self, style: FormatStyle) -> Self {
        self.style = style;
        self
    }

    /// Formatter configured for these options.
    pub fn formatter(&self) -> PatternFormatter {
        PatternFormatter::new(self.style)
    }

    /// Stable hash of every option.
    pub fn fingerprint(&self) -> ArtifactHash {
        let style = match self.style {
            FormatStyle::Simple => 1,
            FormatStyle::Robust => 2,
        };
        ArtifactHash::from_identity(0, &self.toolchain)
            .mix(ArtifactHash(self.serialization.bits() as u64))
            .mix(ArtifactHash(self.header as u64))
            .mix(ArtifactHash(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = GeneratorOptions::default();
        assert!(options.header);
        assert!(options.serialization.is_empty());
        assert!(options.toolchain.starts_with("holdgen "));
        assert_eq!(options.formatter(), PatternFormatter::robust());
    }

    #[test]
    fn fingerprint_tracks_every_option() {
        let base = GeneratorOptions::default();
        let variants = [
            base.clone().with_header(false),
            base.clone().with_toolchain("other 1.0"),
            base.clone().with_style(FormatStyle::Simple),
            base.clone().with_serialization(SerializationSupport::JSON),
        ];

        for variant in &variants {
            assert_ne!(base.fingerprint(), variant.fingerprint(), "{variant:?}");
        }
        assert_eq!(base.fingerprint(), GeneratorOptions::default().fingerprint());
    }

    #[test]
    fn serde_needed_for_any_format() {
        assert!(!SerializationSupport::empty().needs_serde());
        assert!(SerializationSupport::XML.needs_serde());
        assert!((SerializationSupport::JSON | SerializationSupport::MESSAGE_PACK).needs_serde());
    }
}
