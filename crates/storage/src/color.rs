//! Color assignment for newly created teams.

use rand::Rng;
use shared::domain::TeamColor;

pub trait ColorPicker: Send {
    fn pick(&mut self) -> TeamColor;
}

/// Uniformly random `#RRGGBB` colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomColorPicker;

impl ColorPicker for RandomColorPicker {
    fn pick(&mut self) -> TeamColor {
        let mut rng = rand::rng();
        TeamColor::from_rgb(rng.random(), rng.random(), rng.random())
    }
}

/// Hands out colors from a fixed palette, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct PaletteColorPicker {
    palette: Vec<TeamColor>,
    next: usize,
}

impl PaletteColorPicker {
    pub fn new(palette: Vec<TeamColor>) -> Option<Self> {
        if palette.is_empty() {
            return None;
        }
        Some(Self { palette, next: 0 })
    }
}

impl ColorPicker for PaletteColorPicker {
    fn pick(&mut self) -> TeamColor {
        let color = self.palette[self.next % self.palette.len()].clone();
        self.next = (self.next + 1) % self.palette.len();
        color
    }
}
