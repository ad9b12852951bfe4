use ratatui::style::Color;

use crate::model::task::Priority;
use crate::model::view::DueBucket;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    /// Badge colors for A..D
    pub priority_colors: [Color; 4],
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            priority_colors: [
                Color::Rgb(0xFB, 0x71, 0x85), // rose
                Color::Rgb(0x38, 0xBD, 0xF8), // sky
                Color::Rgb(0xFB, 0xBF, 0x24), // amber
                Color::Rgb(0x9C, 0xA3, 0xAF), // gray
            ],
        }
    }
}

impl Theme {
    /// Badge color for a priority; tasks without one use the dim color
    pub fn priority_color(&self, priority: Option<Priority>) -> Color {
        match priority {
            Some(Priority::A) => self.priority_colors[0],
            Some(Priority::B) => self.priority_colors[1],
            Some(Priority::C) => self.priority_colors[2],
            Some(Priority::D) => self.priority_colors[3],
            None => self.dim,
        }
    }

    /// Color for a due date, by how soon it is
    pub fn due_color(&self, bucket: DueBucket) -> Color {
        match bucket {
            DueBucket::Overdue => self.red,
            DueBucket::Today => self.yellow,
            DueBucket::Tomorrow => self.green,
            DueBucket::Later | DueBucket::NoDate => self.dim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_colors_are_distinct() {
        let theme = Theme::default();
        let colors: Vec<Color> = [None, Some(Priority::A), Some(Priority::B), Some(Priority::C)]
            .into_iter()
            .map(|p| theme.priority_color(p))
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(theme.priority_color(None), theme.dim);
    }

    #[test]
    fn overdue_is_red() {
        let theme = Theme::default();
        assert_eq!(theme.due_color(DueBucket::Overdue), theme.red);
        assert_eq!(theme.due_color(DueBucket::Later), theme.dim);
    }
}
