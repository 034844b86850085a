//! Shared test surface and grid builders for the integration suites.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use chrono::NaiveDate;
use timegrid::{
    CellRect, Column, GridConfig, GridError, GridSurface, PhysicalCell, PixelRect,
    PreviewHandle, ScrollState, TimeSeriesGrid,
};

pub const CELL_W: f32 = 20.0;
pub const CELL_H: f32 = 10.0;

/// Observable state of the mock surface, shared with the test body.
#[derive(Debug)]
pub struct SurfaceState {
    /// Visible physical cell rectangle reported to the grid.
    pub visible: CellRect,
    /// Whether the rightmost visible column is only partially visible.
    pub partial_right: bool,
    /// Whether the bottom visible row is only partially visible.
    pub partial_bottom: bool,
    pub client_height: f32,

    // recorded side effects
    pub redraw_all_count: usize,
    pub redrawn: Vec<CellRect>,
    pub scrolled_to: Option<PhysicalCell>,
    pub scrollbar: Option<ScrollState>,
    pub pointer_suppressed: bool,
    pub preview_strip: Option<PixelRect>,
    pub preview_x: Option<f32>,
    pub live_previews: HashSet<u64>,
    next_preview: u64,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            visible: CellRect::new(0, 0, 8, 10),
            partial_right: false,
            partial_bottom: false,
            client_height: 100.0,
            redraw_all_count: 0,
            redrawn: Vec::new(),
            scrolled_to: None,
            scrollbar: None,
            pointer_suppressed: false,
            preview_strip: None,
            preview_x: None,
            live_previews: HashSet::new(),
            next_preview: 0,
        }
    }
}

/// Mock surface with a uniform cell raster of `CELL_W` x `CELL_H` pixels.
pub struct TestSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl TestSurface {
    pub fn new() -> (Box<Self>, Rc<RefCell<SurfaceState>>) {
        let state = Rc::new(RefCell::new(SurfaceState::default()));
        (
            Box::new(Self {
                state: Rc::clone(&state),
            }),
            state,
        )
    }
}

impl GridSurface for TestSurface {
    fn cell_at(&self, x: f32, y: f32) -> Option<PhysicalCell> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        Some(PhysicalCell::new(
            (x / CELL_W) as usize,
            (y / CELL_H) as usize,
        ))
    }

    fn cell_rect(&self, cell: PhysicalCell) -> PixelRect {
        PixelRect::new(
            cell.col as f32 * CELL_W,
            cell.row as f32 * CELL_H,
            CELL_W,
            CELL_H,
        )
    }

    fn visible_cells(&self) -> CellRect {
        self.state.borrow().visible
    }

    // The dimension band and header row behave like fixed cells: always
    // fully visible unless a partial flag marks the probed edge.
    fn is_cell_fully_visible(&self, cell: PhysicalCell) -> bool {
        let s = self.state.borrow();
        if s.partial_right && cell.col + 1 == s.visible.right() {
            return false;
        }
        if s.partial_bottom && cell.row + 1 == s.visible.bottom() {
            return false;
        }
        true
    }

    fn visible_row_count(&self) -> usize {
        self.state.borrow().visible.height
    }

    fn client_height(&self) -> f32 {
        self.state.borrow().client_height
    }

    fn redraw_all(&mut self) {
        self.state.borrow_mut().redraw_all_count += 1;
    }

    fn redraw_cells(&mut self, rect: CellRect) {
        self.state.borrow_mut().redrawn.push(rect);
    }

    fn scroll_to_cell(&mut self, cell: PhysicalCell) {
        self.state.borrow_mut().scrolled_to = Some(cell);
    }

    fn sync_scrollbar(&mut self, scroll: &ScrollState) {
        self.state.borrow_mut().scrollbar = Some(scroll.clone());
    }

    fn set_pointer_suppressed(&mut self, suppressed: bool) {
        self.state.borrow_mut().pointer_suppressed = suppressed;
    }

    fn create_column_preview(&mut self, strip: PixelRect) -> timegrid::Result<PreviewHandle> {
        let mut s = self.state.borrow_mut();
        s.next_preview += 1;
        let id = s.next_preview;
        s.live_previews.insert(id);
        s.preview_strip = Some(strip);
        Ok(PreviewHandle(id))
    }

    fn move_column_preview(&mut self, preview: PreviewHandle, x: f32) -> timegrid::Result<()> {
        let mut s = self.state.borrow_mut();
        if !s.live_previews.contains(&preview.0) {
            return Err(GridError::Disposed("preview image"));
        }
        s.preview_x = Some(x);
        Ok(())
    }

    fn release_column_preview(&mut self, preview: PreviewHandle) -> timegrid::Result<()> {
        let mut s = self.state.borrow_mut();
        if !s.live_previews.remove(&preview.0) {
            return Err(GridError::Disposed("preview image"));
        }
        Ok(())
    }
}

/// Monthly periods starting January 2011.
pub fn monthly_periods(count: usize) -> Vec<NaiveDate> {
    (0..count)
        .map(|i| {
            let month = (i % 12) as u32 + 1;
            let year = 2011 + (i / 12) as i32;
            NaiveDate::from_ymd_opt(year, month, 1).unwrap()
        })
        .collect()
}

/// An empty grid over a fresh test surface.
pub fn empty_grid() -> (TimeSeriesGrid, Rc<RefCell<SurfaceState>>) {
    let (surface, state) = TestSurface::new();
    (TimeSeriesGrid::new(surface, GridConfig::default()), state)
}

/// The reference scenario: one moveable "Name" column, 4 monthly periods,
/// and 3 rows valued 1..4, 10..40, 100..400.
pub fn reference_grid() -> (TimeSeriesGrid, Rc<RefCell<SurfaceState>>) {
    let (mut grid, state) = empty_grid();
    grid.insert_column(0, Column::new("Name").with_moveable(true))
        .unwrap();
    grid.set_periods(&monthly_periods(4));
    grid.set_item_count(3);
    for (index, base) in [1.0, 10.0, 100.0].into_iter().enumerate() {
        grid.set_item_text(index, 0, &format!("row{index}")).unwrap();
        for period in 0..4 {
            grid.set_item_value(index, period, base * (period as f64 + 1.0))
                .unwrap();
        }
    }
    (grid, state)
}
