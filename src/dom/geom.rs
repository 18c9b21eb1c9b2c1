#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, p: Pos) -> bool {
        if self.is_empty() {
            return false;
        }
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Box metrics of one element, relative to its offset parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Geometry {
    pub offset_left: i32,
    pub offset_top: i32,
    pub scroll_left: i32,
    pub scroll_top: i32,
    /// Left border width.
    pub client_left: i32,
    /// Top border width.
    pub client_top: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub const fn at(offset_left: i32, offset_top: i32, width: i32, height: i32) -> Self {
        Self {
            offset_left,
            offset_top,
            scroll_left: 0,
            scroll_top: 0,
            client_left: 0,
            client_top: 0,
            width,
            height,
        }
    }

    /// Contribution of this element to a cumulative offset walk.
    pub fn offset_step(&self) -> Pos {
        Pos::new(
            self.offset_left - self.scroll_left + self.client_left,
            self.offset_top - self.scroll_top + self.client_top,
        )
    }
}

/// Sums `offset - scroll + border` over an offset-parent chain.
pub fn cumulative_offset<'a>(chain: impl IntoIterator<Item = &'a Geometry>) -> Pos {
    chain.into_iter().fold(Pos::default(), |acc, g| {
        let step = g.offset_step();
        acc.offset(step.x, step.y)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/dom/geom.rs"]
mod tests;
