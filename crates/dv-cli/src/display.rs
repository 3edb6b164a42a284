//! Text rendering of generated dungeons
//!
//! Supports plain ASCII and Unicode box-drawing glyphs.

use dv_core::dungeon::{Cell, Dungeon, Generated, Terrain};
use strum::{Display, EnumString, VariantNames};

/// Available glyph modes for text maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum GraphicsMode {
    /// Plain ASCII characters.
    Classic,
    /// Unicode box-drawing characters.
    Fancy,
    /// Pick from the environment's locale.
    #[default]
    Auto,
}

/// Which way a wall cell runs, from its coordinate parity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallRun {
    Horizontal,
    Vertical,
    Corner,
}

impl WallRun {
    pub fn at(r: usize, c: usize) -> Self {
        match (r % 2 == 0, c % 2 == 0) {
            (true, false) => WallRun::Horizontal,
            (false, true) => WallRun::Vertical,
            _ => WallRun::Corner,
        }
    }
}

/// Set of glyphs used for rendering map features.
pub trait GlyphSet: Send + Sync {
    /// Character for room floor.
    fn floor(&self) -> char;

    /// Character for corridor floor.
    fn corridor(&self) -> char;

    /// Character for a room wall.
    fn wall(&self, run: WallRun) -> char;

    /// Character for a map cell; overlays win over terrain.
    fn cell_char(&self, cell: &Cell, r: usize, c: usize) -> char {
        if let Some(stair) = cell.stair {
            return stair.symbol();
        }
        if let Some(door) = cell.door {
            return door.symbol();
        }
        match cell.terrain {
            Terrain::Room => cell.label.unwrap_or_else(|| self.floor()),
            Terrain::Corridor => self.corridor(),
            Terrain::Empty | Terrain::Blocked if cell.perimeter => self.wall(WallRun::at(r, c)),
            Terrain::Empty | Terrain::Blocked => ' ',
        }
    }
}

/// Plain ASCII glyph set.
pub struct ClassicGlyphs;

impl GlyphSet for ClassicGlyphs {
    fn floor(&self) -> char {
        '.'
    }

    fn corridor(&self) -> char {
        '#'
    }

    fn wall(&self, run: WallRun) -> char {
        match run {
            WallRun::Vertical => '|',
            WallRun::Horizontal | WallRun::Corner => '-',
        }
    }
}

/// Unicode box-drawing glyph set.
pub struct FancyGlyphs;

impl GlyphSet for FancyGlyphs {
    fn floor(&self) -> char {
        '·'
    }

    fn corridor(&self) -> char {
        '░'
    }

    fn wall(&self, run: WallRun) -> char {
        match run {
            WallRun::Horizontal => '─',
            WallRun::Vertical => '│',
            WallRun::Corner => '┼',
        }
    }
}

/// Detect if the terminal supports Unicode/UTF-8.
pub fn supports_unicode() -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"].iter().any(|var| {
        std::env::var(var).is_ok_and(|val| {
            let val = val.to_uppercase();
            val.contains("UTF-8") || val.contains("UTF8")
        })
    })
}

/// Returns the best available glyph set for the current environment.
pub fn detect_glyph_set(mode: GraphicsMode) -> Box<dyn GlyphSet> {
    match mode {
        GraphicsMode::Classic => Box::new(ClassicGlyphs),
        GraphicsMode::Fancy => Box::new(FancyGlyphs),
        GraphicsMode::Auto => {
            if supports_unicode() {
                Box::new(FancyGlyphs)
            } else {
                Box::new(ClassicGlyphs)
            }
        }
    }
}

/// Render one floor, one text line per grid row
pub fn render_floor(dungeon: &Dungeon, glyphs: &dyn GlyphSet) -> String {
    let mut out = String::new();
    for (r, row) in dungeon.grid().rows().iter().enumerate() {
        let line: String = row
            .iter()
            .enumerate()
            .map(|(c, cell)| glyphs.cell_char(cell, r, c))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Short summary line for a floor
pub fn floor_header(dungeon: &Dungeon) -> String {
    let name = match dungeon.floor {
        Some(floor) => format!("floor {floor}"),
        None => "dungeon".to_string(),
    };
    format!(
        "{name}: seed {} | {}x{} | {} rooms, {} doors, {} stairs",
        dungeon.seed,
        dungeon.n_rows() + 1,
        dungeon.n_cols() + 1,
        dungeon.rooms().len(),
        dungeon.doors().len(),
        dungeon.stairs().len()
    )
}

/// Render every floor with a header above each
pub fn render(generated: &Generated, glyphs: &dyn GlyphSet) -> String {
    generated
        .floors()
        .into_iter()
        .map(|dungeon| format!("{}\n{}", floor_header(dungeon), render_floor(dungeon, glyphs)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::dungeon::{DoorKind, StairKind};
    use dv_core::Options;

    #[test]
    fn test_graphics_mode_parse() {
        assert_eq!("classic".parse::<GraphicsMode>().unwrap(), GraphicsMode::Classic);
        assert_eq!("fancy".parse::<GraphicsMode>().unwrap(), GraphicsMode::Fancy);
        assert!("shiny".parse::<GraphicsMode>().is_err());
        assert_eq!(GraphicsMode::default(), GraphicsMode::Auto);
    }

    #[test]
    fn test_wall_run() {
        assert_eq!(WallRun::at(0, 1), WallRun::Horizontal);
        assert_eq!(WallRun::at(1, 0), WallRun::Vertical);
        assert_eq!(WallRun::at(2, 2), WallRun::Corner);
    }

    #[test]
    fn test_classic_cell_chars() {
        let glyphs = ClassicGlyphs;
        let room = Cell {
            terrain: Terrain::Room,
            ..Cell::empty()
        };
        assert_eq!(glyphs.cell_char(&room, 1, 1), '.');
        let labelled = Cell {
            label: Some('7'),
            ..room
        };
        assert_eq!(glyphs.cell_char(&labelled, 1, 1), '7');

        let corridor = Cell {
            terrain: Terrain::Corridor,
            ..Cell::empty()
        };
        assert_eq!(glyphs.cell_char(&corridor, 1, 1), '#');
        let door = Cell {
            door: Some(DoorKind::Locked),
            label: Some('x'),
            ..corridor
        };
        assert_eq!(glyphs.cell_char(&door, 1, 2), 'x');
        let stair = Cell {
            stair: Some(StairKind::Up),
            ..corridor
        };
        assert_eq!(glyphs.cell_char(&stair, 1, 1), '<');

        let wall = Cell {
            perimeter: true,
            ..Cell::empty()
        };
        assert_eq!(glyphs.cell_char(&wall, 1, 0), '|');
        assert_eq!(glyphs.cell_char(&wall, 0, 1), '-');
        assert_eq!(glyphs.cell_char(&Cell::empty(), 0, 0), ' ');
    }

    #[test]
    fn test_render_floor_shape() {
        let dungeon = dv_core::generate_floor(&Options::with_seed(42));
        let text = render_floor(&dungeon, &ClassicGlyphs);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), dungeon.n_rows() + 1);
        assert!(lines.iter().all(|line| line.chars().count() <= dungeon.n_cols() + 1));
        let stairs = text.chars().filter(|&ch| ch == '<' || ch == '>').count();
        assert_eq!(stairs, dungeon.stairs().len());
    }

    #[test]
    fn test_render_stack_headers() {
        let opts = Options {
            floors: 2,
            ..Options::with_seed(3)
        };
        let text = render(&dv_core::generate(&opts), &ClassicGlyphs);
        assert!(text.contains("floor 0: seed 3"));
        assert!(text.contains("floor 1: seed 4"));
    }
}
