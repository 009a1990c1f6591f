use crate::base::constants::ANCESTORS_PROGRESS_FRACTIONS;
use crate::extract::ExtractorKind;

/// The export actions offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Contracts,
    AncestorsByObjectSpace,
    AncestorsByStatic,
}

impl ExportKind {
    pub const ALL: [Self; 3] = [
        Self::Contracts,
        Self::AncestorsByObjectSpace,
        Self::AncestorsByStatic,
    ];

    /// The ancestors export backed by `extractor`.
    pub fn for_extractor(extractor: ExtractorKind) -> Self {
        match extractor {
            ExtractorKind::ObjectSpace => Self::AncestorsByObjectSpace,
            ExtractorKind::Static => Self::AncestorsByStatic,
        }
    }

    /// What is being exported, as shown in "Export ..." dialogs.
    pub fn title(self) -> &'static str {
        match self {
            Self::Contracts => "Type Contracts",
            Self::AncestorsByObjectSpace => "ancestors by ObjectSpace",
            Self::AncestorsByStatic => "ancestors by RubyMine",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Contracts => {
                "The selected file will be populated with the contract store, which might be imported later"
            }
            Self::AncestorsByObjectSpace | Self::AncestorsByStatic => "",
        }
    }

    pub fn default_file_name(self, project_name: &str) -> String {
        match self {
            Self::Contracts => format!("{project_name}-type-tracker-contracts"),
            Self::AncestorsByObjectSpace => format!("{project_name}-ancestors-by-objectspace"),
            // Historical name, no separator.
            Self::AncestorsByStatic => format!("{project_name}ancestors-by-rubymine"),
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Contracts => &[".mv.db"],
            Self::AncestorsByObjectSpace | Self::AncestorsByStatic => &["txt"],
        }
    }

    /// Progress steps of this export by default, if it reports progress.
    pub fn progress_fractions(self) -> Option<u32> {
        match self {
            Self::Contracts => None,
            Self::AncestorsByObjectSpace | Self::AncestorsByStatic => {
                Some(ANCESTORS_PROGRESS_FRACTIONS)
            }
        }
    }
}
