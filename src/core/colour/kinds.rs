use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    #[default]
    Fire,
    BlueWhite,
}

impl GradientKind {
    pub const ALL: &'static [Self] = &[Self::Fire, Self::BlueWhite];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Fire => "Fire gradient",
            Self::BlueWhite => "Blue-white gradient",
        }
    }
}

impl std::fmt::Display for GradientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
