use crossterm::style::Color;

/// Colours used when printing engine output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Default text color
    pub fg: Color,
    /// Section headings
    pub heading: Color,
    /// Weights and sums
    pub weight: Color,
    /// Disc names
    pub disc: Color,
    /// Receptacle names
    pub slot: Color,
    /// Submit instruction
    pub confirm: Color,
    /// No-suggestion fallback
    pub fallback: Color,
    /// Secondary info text
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark terminal theme (default)
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            heading: Color::Rgb { r: 130, g: 140, b: 170 },
            weight: Color::Rgb { r: 255, g: 210, b: 100 },
            disc: Color::Rgb { r: 80, g: 180, b: 255 },
            slot: Color::Rgb { r: 190, g: 150, b: 255 },
            confirm: Color::Rgb { r: 90, g: 255, b: 130 },
            fallback: Color::Rgb { r: 255, g: 90, b: 90 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
        }
    }

    /// No colour at all, for pipes and logs
    pub fn plain() -> Self {
        Self {
            fg: Color::Reset,
            heading: Color::Reset,
            weight: Color::Reset,
            disc: Color::Reset,
            slot: Color::Reset,
            confirm: Color::Reset,
            fallback: Color::Reset,
            info: Color::Reset,
        }
    }
}
