use rand::seq::SliceRandom;

use crate::consts::VIBRANT_COLORS;

/// Picks the display color of a newly created trip group
pub trait ColorStrategy: Send + Sync {
    fn next_color(&mut self) -> String;
}

fn palette_or_default(palette: Vec<String>) -> Vec<String> {
    if palette.is_empty() {
        VIBRANT_COLORS.iter().map(|c| (*c).to_owned()).collect()
    } else {
        palette
    }
}

/// Uniformly random pick from a palette
#[derive(Debug, Clone)]
pub struct RandomPalette {
    palette: Vec<String>,
}

impl RandomPalette {
    /// An empty palette falls back to [`VIBRANT_COLORS`]
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette: palette_or_default(palette),
        }
    }
}

impl Default for RandomPalette {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ColorStrategy for RandomPalette {
    fn next_color(&mut self) -> String {
        self.palette
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| VIBRANT_COLORS[0].to_owned())
    }
}

/// Walks the palette in order, wrapping at the end
#[derive(Debug, Clone)]
pub struct CyclingPalette {
    palette: Vec<String>,
    next:    usize,
}

impl CyclingPalette {
    /// An empty palette falls back to [`VIBRANT_COLORS`]
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette: palette_or_default(palette),
            next:    0,
        }
    }
}

impl Default for CyclingPalette {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ColorStrategy for CyclingPalette {
    fn next_color(&mut self) -> String {
        let color = self.palette[self.next % self.palette.len()].clone();
        self.next = (self.next + 1) % self.palette.len();
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycling_palette_wraps() {
        let mut colors = CyclingPalette::new(vec!["#111111".to_owned(), "#222222".to_owned()]);
        let picked: Vec<String> = (0..5).map(|_| colors.next_color()).collect();
        assert_eq!(picked, vec!["#111111", "#222222", "#111111", "#222222", "#111111"]);
    }

    #[test]
    fn test_empty_palette_falls_back_to_defaults() {
        let mut colors = CyclingPalette::new(Vec::new());
        assert_eq!(colors.next_color(), VIBRANT_COLORS[0]);
        assert_eq!(colors.next_color(), VIBRANT_COLORS[1]);
    }

    #[test]
    fn test_random_palette_stays_in_palette() {
        let palette = vec!["#aaaaaa".to_owned(), "#bbbbbb".to_owned()];
        let mut colors = RandomPalette::new(palette.clone());
        for _ in 0..50 {
            assert!(palette.contains(&colors.next_color()));
        }
        let mut defaults = RandomPalette::default();
        assert!(VIBRANT_COLORS.contains(&defaults.next_color().as_str()));
    }
}
