use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::Color;

/// Roles the engine reads colors for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRole {
    Background,
    GridLine,
    AxisText,
    CursorLine,
    NavigatorMask,
    NavigatorFrame,
    TooltipBackground,
}

const FALLBACK: Color = Color::rgba(0.5, 0.5, 0.5, 1.0);

/// Host-provided role-to-color lookup.
///
/// The engine defines no palettes of its own; roles the host leaves out render
/// in a neutral gray.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeTable {
    colors: IndexMap<ColorRole, Color>,
}

impl ThemeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `#rrggbb[aa]` entries.
    pub fn from_hex_entries<'a>(
        entries: impl IntoIterator<Item = (ColorRole, &'a str)>,
    ) -> ChartResult<Self> {
        let mut colors = IndexMap::new();
        for (role, hex) in entries {
            colors.insert(role, Color::from_hex(hex)?);
        }
        Ok(Self { colors })
    }

    #[must_use]
    pub fn with_color(mut self, role: ColorRole, color: Color) -> Self {
        self.colors.insert(role, color);
        self
    }

    /// Color for `role`, gray when the host did not provide one.
    #[must_use]
    pub fn color(&self, role: ColorRole) -> Color {
        self.colors.get(&role).copied().unwrap_or(FALLBACK)
    }

    #[must_use]
    pub fn contains(&self, role: ColorRole) -> bool {
        self.colors.contains_key(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorRole, ThemeTable};
    use crate::render::Color;

    #[test]
    fn missing_roles_fall_back_to_gray() {
        let theme = ThemeTable::from_hex_entries([(ColorRole::Background, "#ffffff")])
            .expect("theme");
        assert_eq!(theme.color(ColorRole::Background), Color::rgb(1.0, 1.0, 1.0));
        assert_eq!(theme.color(ColorRole::GridLine), Color::rgb(0.5, 0.5, 0.5));
        assert!(!theme.contains(ColorRole::CursorLine));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(ThemeTable::from_hex_entries([(ColorRole::AxisText, "white")]).is_err());
    }
}
