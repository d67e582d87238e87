use pathviz_core::{Grid, Point};

/// Append the legal successors of `p` into `buf`. The caller clears `buf`
/// before calling.
///
/// Successors are the eight neighbours in clockwise order starting straight
/// up, minus those out of bounds or on an obstacle. A diagonal step is also
/// dropped when both orthogonal cells it passes between are obstacles, so a
/// search cannot squeeze through the corner two obstacles share.
pub fn successors(grid: &Grid, p: Point, buf: &mut Vec<Point>) {
    for n in p.neighbors_8() {
        if !grid.contains(n) || grid.is_obstacle(n) {
            continue;
        }
        let d = n - p;
        if d.x != 0
            && d.y != 0
            && grid.is_obstacle(p.shift(d.x, 0))
            && grid.is_obstacle(p.shift(0, d.y))
        {
            continue;
        }
        buf.push(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn succ(grid: &Grid, p: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        successors(grid, p, &mut buf);
        buf
    }

    #[test]
    fn open_cell_has_eight_in_order() {
        let g = Grid::new(3, 3);
        let s = succ(&g, Point::new(1, 1));
        assert_eq!(s, Point::new(1, 1).neighbors_8().to_vec());
    }

    #[test]
    fn corner_cell_is_clipped_to_bounds() {
        let g = Grid::new(3, 3);
        let s = succ(&g, Point::ZERO);
        assert_eq!(s, vec![Point::new(1, 0), Point::new(1, 1), Point::new(0, 1)]);
    }

    #[test]
    fn obstacles_are_excluded() {
        let g: Grid = "\
            .#.\n\
            ...\n\
            .#."
            .parse()
            .unwrap();
        let s = succ(&g, Point::new(1, 1));
        assert_eq!(s.len(), 6);
        assert!(!s.contains(&Point::new(1, 0)));
        assert!(!s.contains(&Point::new(1, 2)));
    }

    #[test]
    fn diagonal_between_two_obstacles_is_blocked() {
        let g: Grid = "\
            .#\n\
            #."
            .parse()
            .unwrap();
        assert!(succ(&g, Point::ZERO).is_empty());
        assert!(succ(&g, Point::new(1, 1)).is_empty());
    }

    #[test]
    fn diagonal_past_one_obstacle_is_allowed() {
        let g: Grid = "\
            .#\n\
            .."
            .parse()
            .unwrap();
        let s = succ(&g, Point::ZERO);
        assert!(s.contains(&Point::new(1, 1)));
    }
}
