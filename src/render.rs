//! ASCII frame renderer
//!
//! Draws one published `Frame` as a text cross. This is display glue only:
//! it reads the snapshot, never the engine. Right-hand traffic layout:
//! eastbound runs along the lower horizontal row, westbound the upper;
//! southbound down the left vertical column, northbound up the right.

use crate::simulation::{Direction, Frame, LightColor};

/// Render a frame to a multi-line string, one character per road section
pub fn draw_frame(frame: &Frame) -> String {
    let s = frame.sections;
    let dim = 2 * s + 2;
    let mut grid = vec![vec![' '; dim]; dim];

    // Carve the two road bands
    for i in 0..dim {
        grid[s][i] = '.';
        grid[s + 1][i] = '.';
        grid[i][s] = '.';
        grid[i][s + 1] = '.';
    }

    // Overlay vehicles, one glyph per occupied section
    for direction in Direction::ALL {
        for (slot, view) in frame.lanes[direction.index()].iter().enumerate() {
            if let Some(view) = view {
                let (row, col) = cell_for(direction, slot, s);
                grid[row][col] = view.class.glyph();
            }
        }
    }

    let mut out = format!(
        "tick {:>4} | north-south {} | east-west {}\n",
        frame.tick,
        color_name(frame.north_south),
        color_name(frame.east_west)
    );
    for row in &grid {
        out.push_str(&row.iter().collect::<String>());
        out.push('\n');
    }
    out
}

/// Map a lane slot to its grid cell
fn cell_for(direction: Direction, slot: usize, sections: usize) -> (usize, usize) {
    let far = 2 * sections + 1;
    match direction {
        Direction::East => (sections + 1, slot),
        Direction::West => (sections, far - slot),
        Direction::South => (slot, sections),
        Direction::North => (far - slot, sections + 1),
    }
}

fn color_name(color: LightColor) -> &'static str {
    match color {
        LightColor::Green => "GREEN ",
        LightColor::Yellow => "YELLOW",
        LightColor::Red => "RED   ",
    }
}
